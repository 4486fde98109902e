use std::sync::Arc;

use http::Method;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::credentials::{Credentials, OAuthConfig};
use crate::error::Result;
use crate::v1::nonce::{Clock, NonceSource, SystemClock, UuidNonce};
use crate::v1::{OAuthWebRequest, ParameterTransport, SignatureMethod, SignedRequest};

impl SignedRequest {
    /// Turn the signed request into a `reqwest` builder on `client`.
    pub fn to_request_builder(&self, client: &Client) -> RequestBuilder {
        let builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }
}

impl OAuthWebRequest {
    /// Sign (once) and send the request.
    pub async fn send(&mut self, client: &Client) -> Result<Response> {
        self.send_with(client, |builder| builder).await
    }

    /// Sign (once), let `attach` add what the signer leaves to the caller,
    /// e.g. a multipart body, then send.
    pub async fn send_with<F>(&mut self, client: &Client, attach: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let builder = attach(self.sign()?.to_request_builder(client));
        let response = builder.send().await?;
        debug!(status = %response.status(), url = %response.url(), "oauth request completed");
        Ok(response)
    }
}

/// OAuth 1.0a aware HTTP client.
///
/// Hands out [`OAuthWebRequest`]s preloaded with the client's credentials
/// and options.
#[derive(Clone)]
pub struct OAuthClient {
    http: Client,
    credentials: Credentials,
    signature_method: SignatureMethod,
    transport: ParameterTransport,
    realm: Option<String>,
    nonce_source: Arc<dyn NonceSource>,
    clock: Arc<dyn Clock>,
}

impl OAuthClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_http_client(Client::new(), credentials)
    }

    pub fn with_http_client(http: Client, credentials: Credentials) -> Self {
        OAuthClient {
            http,
            credentials,
            signature_method: SignatureMethod::HmacSha1,
            transport: ParameterTransport::QueryOrBody,
            realm: None,
            nonce_source: Arc::new(UuidNonce),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build a client from `OAUTH_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Build a client from a loaded [`OAuthConfig`].
    pub fn from_config(config: OAuthConfig) -> Result<Self> {
        let mut client = Self::new(config.credentials).signature_method(config.signature_method)?;
        client.realm = config.realm;
        Ok(client)
    }

    pub fn signature_method(mut self, method: SignatureMethod) -> Result<Self> {
        self.signature_method = method.ensure_supported()?;
        Ok(self)
    }

    pub fn transport(mut self, transport: ParameterTransport) -> Self {
        self.transport = transport;
        self
    }

    pub fn nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = source;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn http_client(&self) -> &Client {
        &self.http
    }

    pub fn request(&self, method: Method, uri: &str) -> Result<OAuthWebRequest> {
        let mut request = OAuthWebRequest::new(method, uri)?;
        request
            .credentials(self.credentials.clone())
            .transport(self.transport)
            .nonce_source(self.nonce_source.clone())
            .clock(self.clock.clone())
            .set_signature_method(self.signature_method)?;
        if let Some(realm) = &self.realm {
            request.realm(realm.as_str());
        }
        Ok(request)
    }

    pub fn get(&self, uri: &str) -> Result<OAuthWebRequest> {
        self.request(Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> Result<OAuthWebRequest> {
        self.request(Method::POST, uri)
    }

    pub async fn execute(&self, request: &mut OAuthWebRequest) -> Result<Response> {
        request.send(&self.http).await
    }
}
