use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::v1::SignatureMethod;

pub const ENV_CONSUMER_KEY: &str = "OAUTH_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "OAUTH_CONSUMER_SECRET";
pub const ENV_TOKEN: &str = "OAUTH_TOKEN";
pub const ENV_TOKEN_SECRET: &str = "OAUTH_TOKEN_SECRET";

/// Client and (optionally) token credentials.
///
/// `token`/`token_secret` are absent for two-legged requests. Empty strings
/// count as absent.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_secret: Option<String>,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn token_secret(&self) -> Option<&str> {
        self.token_secret.as_deref().filter(|t| !t.is_empty())
    }

    /// Read credentials from the environment, after loading `.env` from the
    /// working directory if one exists. Variables already set win.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`Credentials::from_env`], loading the given `.env` file first.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::from_path(path.as_ref())?;
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| {
            get(name).ok_or_else(|| Error::Config(format!("environment variable {} is not set", name)))
        };
        Ok(Credentials {
            consumer_key: required(ENV_CONSUMER_KEY)?,
            consumer_secret: required(ENV_CONSUMER_SECRET)?,
            token: get(ENV_TOKEN),
            token_secret: get(ENV_TOKEN_SECRET),
        })
    }
}

// secrets stay out of logs and panics
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Signing settings loaded from a TOML document:
///
/// ```toml
/// signature_method = "HMAC-SHA1"
///
/// [credentials]
/// consumer_key = "key"
/// consumer_secret = "secret"
/// token = "accesskey"
/// token_secret = "accesssecret"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OAuthConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub signature_method: SignatureMethod,
    #[serde(default)]
    pub realm: Option<String>,
}

impl OAuthConfig {
    /// Parse a TOML document; signature methods that cannot sign are refused
    /// here rather than on the first request.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: OAuthConfig =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.signature_method.ensure_supported()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }
}
