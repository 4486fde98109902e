//! OAuth 1.0a request signing.
//!
//! ```no_run
//! # async fn run() -> oauthrequest::error::Result<()> {
//! use oauthrequest::{Credentials, OAuthWebRequest, ParameterSink};
//!
//! let mut request = OAuthWebRequest::get("http://term.ie/oauth/example/echo_api.php")?;
//! request
//!     .credentials(Credentials::new("key", "secret").with_token("accesskey", "accesssecret"))
//!     .add_pair("method", "test");
//! let response = request.send(&reqwest::Client::new()).await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod encoder;
pub mod error;
pub mod parameters;
pub mod v1;

mod util;

pub use credentials::{Credentials, OAuthConfig};
pub use error::{Error, Result};
pub use parameters::{ParameterSink, RequestParameter};
pub use v1::{OAuthWebRequest, ParameterTransport, SignatureMethod, SignedRequest, SigningState};
#[cfg(feature = "reqwest")]
pub use v1::OAuthClient;
