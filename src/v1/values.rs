use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";
pub const OAUTH_VALUE_SIGMETHOD_PLAINTEXT: &str = "PLAINTEXT";
pub const OAUTH_VALUE_SIGMETHOD_RSASHA1: &str = "RSA-SHA1";

pub const OAUTH_PARAM_KEY_CALLBACK: &str = "oauth_callback";
pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_VERIFIER: &str = "oauth_verifier";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";
pub const OAUTH_PARAM_KEY_REALM: &str = "realm";

pub const OAUTH_HEADER_SCHEME: &str = "OAuth";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureMethod {
    #[serde(rename = "PLAINTEXT")]
    PlainText,
    #[default]
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    /// Recognised so it can be refused; there is no RSA implementation.
    #[serde(rename = "RSA-SHA1")]
    RsaSha1,
}

impl SignatureMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::PlainText => OAUTH_VALUE_SIGMETHOD_PLAINTEXT,
            SignatureMethod::HmacSha1 => OAUTH_VALUE_SIGMETHOD_HMACSHA1,
            SignatureMethod::RsaSha1 => OAUTH_VALUE_SIGMETHOD_RSASHA1,
        }
    }

    /// Refuse methods this crate cannot sign with.
    pub fn ensure_supported(self) -> Result<Self, Error> {
        match self {
            SignatureMethod::RsaSha1 => Err(Error::NotSupported(
                "RSA-SHA1 signature method is not supported".into(),
            )),
            method => Ok(method),
        }
    }
}

impl From<SignatureMethod> for &'static str {
    fn from(method: SignatureMethod) -> Self {
        method.as_str()
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            OAUTH_VALUE_SIGMETHOD_HMACSHA1 => Ok(SignatureMethod::HmacSha1),
            OAUTH_VALUE_SIGMETHOD_PLAINTEXT => Ok(SignatureMethod::PlainText),
            OAUTH_VALUE_SIGMETHOD_RSASHA1 => Ok(SignatureMethod::RsaSha1),
            other => Err(Error::InvalidOperation(format!(
                "signature method {:?} is out of range",
                other
            ))),
        }
    }
}

/// Where the OAuth protocol parameters travel once a request is signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParameterTransport {
    /// Query string for bodiless methods, form body otherwise; falls back to
    /// the `Authorization` header when the body is not form-encoded.
    #[default]
    QueryOrBody,
    /// Always in an `Authorization: OAuth ...` header.
    AuthorizationHeader,
}
