use thiserror::Error;

/// Errors raised while configuring or signing a request.
///
/// Every variant except `Http` is produced before any network I/O happens.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("oauth credentials are required to sign this request")]
    Unauthorized,
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("not implemented: {0}")]
    Unimplemented(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
    #[cfg(feature = "reqwest")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
