//! Signature base string construction ([RFC 5849 section 3.4.1][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.1

use tracing::trace;
use url::Url;

use crate::encoder::percent_encode;
use crate::error::{Error, Result};
use crate::parameters::{EncodedParameter, RequestParameter};
use crate::util;

/// Encode, sort and join parameters into the normalized parameter string.
///
/// Sorting happens after encoding, by encoded name then encoded value.
pub fn normalize(params: &[RequestParameter]) -> String {
    let mut encoded = params
        .iter()
        .map(RequestParameter::encoded)
        .collect::<Vec<EncodedParameter>>();
    encoded.sort();
    encoded
        .iter()
        .map(EncodedParameter::to_string)
        .collect::<Vec<String>>()
        .join("&")
}

/// Build `METHOD&ENCODED_URI&ENCODED_NORMALIZED_PARAMS`.
///
/// The query and fragment of `uri` are dropped; parameters that should be
/// signed must be passed in `params`.
pub fn build(method: &str, uri: &str, params: &[RequestParameter]) -> Result<String> {
    let url = util::parse_uri(uri)?;
    build_for_url(method, &url, params)
}

pub fn build_for_url(method: &str, url: &Url, params: &[RequestParameter]) -> Result<String> {
    if method.trim().is_empty() {
        return Err(Error::InvalidArgument("http method must not be empty".into()));
    }
    if url.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "uri {} is not a hierarchical http uri",
            url
        )));
    }
    let endpoint = util::endpoint_of(url);
    // parameters are encoded twice: once while normalizing, once here
    let base = format!(
        "{}&{}&{}",
        percent_encode(&method.to_ascii_uppercase()),
        percent_encode(endpoint.as_str()),
        percent_encode(&normalize(params))
    );
    trace!(base_string = %base, "built signature base string");
    Ok(base)
}
