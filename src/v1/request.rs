use std::fmt;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use http::Method;
use tracing::debug;
use url::Url;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::parameters::{ParameterSink, RequestParameter};
use crate::util;
use crate::v1::nonce::{Clock, NonceSource, SystemClock, UuidNonce};
use crate::v1::*;

/// Observable signing progress of an [`OAuthWebRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningState {
    Unsigned,
    Signing,
    Signed,
}

/// The physical request produced by signing.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// `oauth_signature`, not percent-encoded.
    pub signature: String,
}

enum State {
    Unsigned,
    Signing,
    Signed(SignedRequest),
}

/// A request that signs itself with OAuth 1.0a the first time it is used.
///
/// Parameters, credentials and options are set freely; nothing is computed
/// until [`OAuthWebRequest::sign`] (or `send`) runs. The signed request is then
/// cached and reused until the request is changed again.
///
/// The nonce and timestamp are drawn once, on the first signing, and kept for
/// the lifetime of the object: re-signing after a change or re-sending the
/// same request reuses them. Call [`OAuthWebRequest::refresh_nonce`] to draw
/// new ones before a retry that must look like a fresh request.
pub struct OAuthWebRequest {
    method: Method,
    url: Url,
    content_type: String,
    parameters: Vec<RequestParameter>,
    credentials: Option<Credentials>,
    signature_method: SignatureMethod,
    transport: ParameterTransport,
    realm: Option<String>,
    callback: Option<String>,
    verifier: Option<String>,
    nonce_source: Arc<dyn NonceSource>,
    clock: Arc<dyn Clock>,
    nonce: Option<String>,
    timestamp: Option<i64>,
    state: State,
}

impl OAuthWebRequest {
    pub fn new(method: Method, uri: &str) -> Result<Self> {
        Ok(Self::from_url(method, util::parse_uri(uri)?))
    }

    pub fn from_url(method: Method, url: Url) -> Self {
        OAuthWebRequest {
            method,
            url,
            content_type: CONTENT_TYPE_FORM.into(),
            parameters: Vec::new(),
            credentials: None,
            signature_method: SignatureMethod::default(),
            transport: ParameterTransport::default(),
            realm: None,
            callback: None,
            verifier: None,
            nonce_source: Arc::new(UuidNonce),
            clock: Arc::new(SystemClock),
            nonce: None,
            timestamp: None,
            state: State::Unsigned,
        }
    }

    pub fn get(uri: &str) -> Result<Self> {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Result<Self> {
        Self::new(Method::POST, uri)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn parameters(&self) -> &[RequestParameter] {
        &self.parameters
    }

    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    pub fn state(&self) -> SigningState {
        match self.state {
            State::Unsigned => SigningState::Unsigned,
            State::Signing => SigningState::Signing,
            State::Signed(_) => SigningState::Signed,
        }
    }

    pub fn credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = Some(credentials);
        self.invalidate()
    }

    /// Select the signature method. RSA-SHA1 is refused here, before any
    /// signing is attempted.
    pub fn set_signature_method(&mut self, method: SignatureMethod) -> Result<&mut Self> {
        self.signature_method = method.ensure_supported()?;
        Ok(self.invalidate())
    }

    pub fn content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.content_type = content_type.into();
        self.invalidate()
    }

    pub fn transport(&mut self, transport: ParameterTransport) -> &mut Self {
        self.transport = transport;
        self.invalidate()
    }

    /// `realm` for the `Authorization` header. Never signed.
    pub fn realm(&mut self, realm: impl Into<String>) -> &mut Self {
        self.realm = Some(realm.into());
        self.invalidate()
    }

    pub fn callback(&mut self, callback: impl Into<String>) -> &mut Self {
        self.callback = Some(callback.into());
        self.invalidate()
    }

    pub fn verifier(&mut self, verifier: impl Into<String>) -> &mut Self {
        self.verifier = Some(verifier.into());
        self.invalidate()
    }

    pub fn nonce_source(&mut self, source: Arc<dyn NonceSource>) -> &mut Self {
        self.nonce_source = source;
        self.refresh_nonce()
    }

    pub fn clock(&mut self, clock: Arc<dyn Clock>) -> &mut Self {
        self.clock = clock;
        self.refresh_nonce()
    }

    /// Forget the memoized nonce and timestamp; the next signing draws new ones.
    pub fn refresh_nonce(&mut self) -> &mut Self {
        self.nonce = None;
        self.timestamp = None;
        self.invalidate()
    }

    fn invalidate(&mut self) -> &mut Self {
        self.state = State::Unsigned;
        self
    }

    /// Sign the request if it is not signed yet and return the result.
    pub fn sign(&mut self) -> Result<&SignedRequest> {
        if !matches!(self.state, State::Signed(_)) {
            self.state = State::Signing;
            match self.assemble() {
                Ok(signed) => self.state = State::Signed(signed),
                Err(e) => {
                    self.state = State::Unsigned;
                    return Err(e);
                }
            }
        }
        match &self.state {
            State::Signed(signed) => Ok(signed),
            _ => Err(Error::InvalidOperation(
                "request did not reach the signed state".into(),
            )),
        }
    }

    fn nonce_and_timestamp(&mut self) -> (String, i64) {
        let source = &self.nonce_source;
        let nonce = self.nonce.get_or_insert_with(|| source.nonce()).clone();
        let clock = &self.clock;
        let timestamp = *self.timestamp.get_or_insert_with(|| clock.timestamp());
        (nonce, timestamp)
    }

    fn is_form_encoded(&self) -> bool {
        let essence = self.content_type.split(';').next().unwrap_or("").trim();
        essence.eq_ignore_ascii_case(CONTENT_TYPE_FORM)
    }

    fn validate_credentials(&self) -> Result<&Credentials> {
        let credentials = self.credentials.as_ref().ok_or(Error::Unauthorized)?;
        if credentials.consumer_key.is_empty() {
            return Err(Error::InvalidOperation(
                "oauth consumer key must not be empty".into(),
            ));
        }
        Ok(credentials)
    }

    fn assemble(&mut self) -> Result<SignedRequest> {
        self.validate_credentials()?;
        let (nonce, timestamp) = self.nonce_and_timestamp();
        let credentials = self.validate_credentials()?;

        let has_body = method_has_body(&self.method);
        let form = self.is_form_encoded();
        let header_mode = self.transport == ParameterTransport::AuthorizationHeader
            || (has_body && !form);

        let mut oauth_params = build_basic_params(
            credentials,
            self.signature_method,
            nonce,
            timestamp,
            self.callback.as_deref(),
            self.verifier.as_deref(),
        );
        // protocol parameters come from the request settings only
        let is_protocol = |p: &RequestParameter| {
            p.name() == OAUTH_PARAM_KEY_SIGNATURE
                || oauth_params.iter().any(|o| o.name() == p.name())
        };

        let user_params = self
            .parameters
            .iter()
            .filter(|&p| !is_protocol(p))
            .cloned()
            .collect::<Vec<RequestParameter>>();
        if has_body && !form && !user_params.is_empty() {
            return Err(Error::Unimplemented(format!(
                "body parameters for content type {:?} must be attached by the caller",
                self.content_type
            )));
        }

        let (endpoint, mut query_params) = util::url_to_endpoint_and_queries(&self.url);
        query_params.retain(|p| !is_protocol(p));

        // the signature never takes part in its own base string; a non-form
        // body signs the protocol parameters alone
        let signing = if has_body && !form {
            oauth_params.clone()
        } else {
            [query_params.as_slice(), user_params.as_slice(), oauth_params.as_slice()]
                .concat::<RequestParameter>()
        };

        let base = base_string::build_for_url(self.method.as_str(), &endpoint, &signing)?;
        let signature = signer::sign(
            &credentials.consumer_secret,
            credentials.token_secret(),
            &base,
            self.signature_method,
        )?;
        oauth_params.push(RequestParameter::new(OAUTH_PARAM_KEY_SIGNATURE, signature.clone()));

        let mut headers = HeaderMap::new();
        let mut url = self.url.clone();
        let mut body = None;
        let wire_oauth: &[RequestParameter] = if header_mode { &[] } else { &oauth_params };

        if !has_body {
            let query = [query_params.as_slice(), user_params.as_slice(), wire_oauth]
                .concat::<RequestParameter>();
            url = endpoint;
            if !query.is_empty() {
                url.set_query(Some(&base_string::normalize(&query)));
            }
        } else if form {
            let payload = base_string::normalize(
                &[user_params.as_slice(), wire_oauth].concat::<RequestParameter>(),
            );
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(&self.content_type)?);
            headers.insert(CONTENT_LENGTH, HeaderValue::from(payload.len()));
            body = Some(payload.into_bytes());
        }
        if header_mode {
            let value = authorization_header(self.realm.as_deref(), &oauth_params);
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&value)?);
        }

        debug!(
            method = %self.method,
            endpoint = %util::endpoint_of(&self.url),
            signature_method = %self.signature_method,
            header_mode,
            "signed oauth request"
        );
        Ok(SignedRequest {
            method: self.method.clone(),
            url,
            headers,
            body,
            signature,
        })
    }
}

impl ParameterSink for OAuthWebRequest {
    fn add_parameter(&mut self, parameter: RequestParameter) -> &mut Self {
        self.parameters.push(parameter);
        self.invalidate()
    }
}

impl fmt::Debug for OAuthWebRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthWebRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("content_type", &self.content_type)
            .field("parameters", &self.parameters)
            .field("signature_method", &self.signature_method)
            .field("transport", &self.transport)
            .field("state", &self.state())
            .finish()
    }
}

fn method_has_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn build_basic_params(
    credentials: &Credentials,
    signature_method: SignatureMethod,
    nonce: String,
    timestamp: i64,
    callback: Option<&str>,
    verifier: Option<&str>,
) -> Vec<RequestParameter> {
    let params = vec![
        (OAUTH_PARAM_KEY_CONSUMER_KEY, Some(credentials.consumer_key.clone())),
        (OAUTH_PARAM_KEY_NONCE, Some(nonce)),
        (OAUTH_PARAM_KEY_SIGNATURE_METHOD, Some(signature_method.as_str().into())),
        (OAUTH_PARAM_KEY_TIMESTAMP, Some(timestamp.to_string())),
        (OAUTH_PARAM_KEY_VERSION, Some(OAUTH_VALUE_VERSION.into())),
        // noneable parameters
        (OAUTH_PARAM_KEY_TOKEN, credentials.token().map(String::from)),
        (OAUTH_PARAM_KEY_CALLBACK, callback.map(String::from)),
        (OAUTH_PARAM_KEY_VERIFIER, verifier.map(String::from)),
    ];
    params
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| RequestParameter::new(k, v)))
        .collect()
}

/// `OAuth realm="..", name="value", ...` with every name and value encoded.
fn authorization_header(realm: Option<&str>, oauth_params: &[RequestParameter]) -> String {
    let mut encoded = oauth_params
        .iter()
        .map(RequestParameter::encoded)
        .collect::<Vec<_>>();
    encoded.sort();
    let parts = realm
        .map(|r| format!("{}=\"{}\"", OAUTH_PARAM_KEY_REALM, r.replace('"', "\\\"")))
        .into_iter()
        .chain(encoded.iter().map(|p| format!("{}=\"{}\"", p.name, p.value)))
        .collect::<Vec<String>>()
        .join(", ");
    format!("{} {}", OAUTH_HEADER_SCHEME, parts)
}
