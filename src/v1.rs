//! OAuth 1.0a ([RFC 5849](https://tools.ietf.org/html/rfc5849)) request signing.

pub mod base_string;
#[cfg(feature = "reqwest")]
mod client;
pub mod nonce;
pub mod request;
pub mod signer;
mod values;

#[cfg(feature = "reqwest")]
pub use client::OAuthClient;
pub use request::{OAuthWebRequest, SignedRequest, SigningState};
pub use values::*;
