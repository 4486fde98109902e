use url::Url;

use crate::error::{Error, Result};
use crate::parameters::RequestParameter;

/// Parse an absolute request URI.
pub fn parse_uri(uri: &str) -> Result<Url> {
    if uri.trim().is_empty() {
        return Err(Error::InvalidArgument("uri must not be empty".into()));
    }
    Url::parse(uri).map_err(|e| Error::InvalidArgument(format!("invalid uri {:?}: {}", uri, e)))
}

/// Split a URL into its base string URI and the parameters of its query.
///
/// The endpoint keeps scheme, authority and path only. `url` has already
/// lowercased scheme and host and removed a default port.
pub fn url_to_endpoint_and_queries(url: &Url) -> (Url, Vec<RequestParameter>) {
    let params = url.query().map(query_pairs).unwrap_or_default();
    (endpoint_of(url), params)
}

pub fn endpoint_of(url: &Url) -> Url {
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
}

/// Decode an `application/x-www-form-urlencoded` query into parameters.
pub fn query_pairs(query: &str) -> Vec<RequestParameter> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .map(|(k, v)| RequestParameter::new(k, v))
        .collect()
}
