use percent_encoding::{utf8_percent_encode, AsciiSet};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` as OAuth requires.
///
/// Every byte of the UTF-8 representation outside the unreserved set is
/// escaped; `url`-style encoders leave characters like `*`, `!` or `'`
/// unescaped, which breaks signature comparison.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

/// Encode an optional value, treating `None` like the empty string.
pub fn percent_encode_opt(input: Option<&str>) -> String {
    input.map(percent_encode).unwrap_or_default()
}
