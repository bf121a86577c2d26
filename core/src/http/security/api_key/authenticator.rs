//! API Key authenticator implementation.

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::uri::PathAndQuery;
use actix_web::HttpMessage;

use super::config::ApiKeyConfig;
use super::error::ApiKeyConfigError;
use super::source::{encode_query_without, set_path_and_query, ApiKeySource, SourceKind};

const DEFAULT_NAME: &str = "api-key-auth";

/// The key that authenticated a request and where it was found.
///
/// Inserted into the request extensions on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyIdentity {
    key: String,
    source: SourceKind,
}

impl ApiKeyIdentity {
    pub fn new(key: impl Into<String>, source: SourceKind) -> Self {
        Self {
            key: key.into(),
            source,
        }
    }

    /// The allow-list entry that matched.
    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_source(&self) -> SourceKind {
        self.source
    }
}

/// Outcome of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A key matched; the request was prepared for forwarding.
    Granted(ApiKeyIdentity),
    /// No key matched; the caller gets a `403`.
    Rejected,
    /// No key matched; the request was rewritten to the internal error route.
    Rerouted(String),
}

#[derive(Debug)]
struct Inner {
    name: String,
    keys: Vec<String>,
    sources: Vec<ApiKeySource>,
    remove_headers_on_success: bool,
    remove_query_params_on_success: bool,
    forward_header: Option<HeaderName>,
    error_route: Option<String>,
}

/// Authenticator that validates API keys from requests.
///
/// Keys are looked for in a fixed order: dedicated header, bearer header,
/// query parameter, URL path. Disabled locations are skipped and the first
/// location yielding an allowed key wins; an enabled location that yields
/// nothing does not stop the search.
///
/// The authenticator is immutable after construction and cheap to clone.
///
/// # Example
///
/// ```ignore
/// use actix_key_auth_core::http::security::api_key::{ApiKeyAuthenticator, ApiKeyConfig};
///
/// let authenticator = ApiKeyAuthenticator::new(
///     ApiKeyConfig::new()
///         .add_key("sk_live_abc123")
///         .forward_header("X-Auth-Key"),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyAuthenticator {
    inner: Arc<Inner>,
}

impl ApiKeyAuthenticator {
    /// Validates the configuration and builds an authenticator.
    pub fn new(config: ApiKeyConfig) -> Result<Self, ApiKeyConfigError> {
        Self::named(DEFAULT_NAME, config)
    }

    /// Same as [`new`](Self::new), with an instance name used in log lines.
    pub fn named(name: impl Into<String>, config: ApiKeyConfig) -> Result<Self, ApiKeyConfigError> {
        let name = name.into();

        if config.keys.is_empty() {
            return Err(ApiKeyConfigError::NoKeys);
        }
        if config.keys.iter().any(String::is_empty) {
            return Err(ApiKeyConfigError::EmptyKey);
        }

        let sources = sources(&config)?;
        if sources.is_empty() {
            return Err(ApiKeyConfigError::NoKeySource);
        }

        let forward_header = match config.internal_forward_header_name.as_str() {
            "" => None,
            header => {
                if config.keys.iter().any(|k| HeaderValue::from_str(k).is_err()) {
                    return Err(ApiKeyConfigError::InvalidKeyValue);
                }
                Some(header_name(header)?)
            }
        };

        let error_route = match config.internal_error_route.as_str() {
            "" => None,
            route => {
                let valid = route.starts_with('/')
                    && !route.contains('?')
                    && PathAndQuery::try_from(route).is_ok();
                if !valid {
                    return Err(ApiKeyConfigError::InvalidErrorRoute {
                        route: route.to_string(),
                    });
                }
                Some(route.to_string())
            }
        };

        log::info!(
            "Creating api key authenticator {}: sources [{}], {} key(s)",
            name,
            sources
                .iter()
                .map(|s| s.kind().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            config.keys.len()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                name,
                keys: config.keys,
                sources,
                remove_headers_on_success: config.remove_headers_on_success,
                remove_query_params_on_success: config.remove_query_params_on_success,
                forward_header,
                error_route,
            }),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.inner.name
    }

    /// The enabled key locations, in evaluation order.
    pub fn get_sources(&self) -> &[ApiKeySource] {
        &self.inner.sources
    }

    /// Looks up an allowed key in the request without touching it.
    pub fn find_key(&self, req: &ServiceRequest) -> Option<(&ApiKeySource, &str)> {
        let keys = &self.inner.keys;
        self.inner
            .sources
            .iter()
            .find_map(|source| source.find(req, keys).map(|key| (source, key)))
    }

    /// Authenticates the request and applies the success or failure
    /// mutations to it.
    ///
    /// Never calls the downstream service and never writes a response;
    /// the caller acts on the returned [`Verdict`].
    pub fn authenticate(&self, req: &mut ServiceRequest) -> Verdict {
        match self.find_key(req) {
            Some((source, key)) => self.grant(req, source, key.to_string()),
            None => self.deny(req),
        }
    }

    fn grant(&self, req: &mut ServiceRequest, source: &ApiKeySource, key: String) -> Verdict {
        match source {
            ApiKeySource::Header(name) | ApiKeySource::Bearer(name) => {
                if self.inner.remove_headers_on_success {
                    req.headers_mut().remove(name);
                }
            }
            ApiKeySource::Query(name) => {
                let remove = self
                    .inner
                    .remove_query_params_on_success
                    .then_some(name.as_str());
                let query = encode_query_without(req.query_string(), remove);
                let path = req.path().to_string();
                if let Err(e) = set_path_and_query(req, &path, &query) {
                    log::warn!("{}: could not rewrite query string: {}", self.inner.name, e);
                }
            }
            ApiKeySource::PathSegment(_) => {}
        }

        if let Some(header) = &self.inner.forward_header {
            // Keys were checked to be valid header values at construction.
            // Replaces any value the client sent under the same name.
            if let Ok(value) = HeaderValue::from_str(&key) {
                req.headers_mut().insert(header.clone(), value);
            }
        }

        log::info!(
            "{}: api key accepted from {} for {}",
            self.inner.name,
            source.kind(),
            req.uri()
        );

        let identity = ApiKeyIdentity::new(key, source.kind());
        req.extensions_mut().insert(identity.clone());
        Verdict::Granted(identity)
    }

    fn deny(&self, req: &mut ServiceRequest) -> Verdict {
        let Some(route) = &self.inner.error_route else {
            log::debug!("{}: rejected {}", self.inner.name, req.uri());
            return Verdict::Rejected;
        };

        // Inside a scope the router has already consumed a prefix of the old
        // path, so the rewritten path would be resolved from a stale offset.
        let info = req.match_info();
        if info.unprocessed().len() != info.as_str().len() {
            log::warn!(
                "{}: cannot reroute {} to {} from inside a scope",
                self.inner.name,
                req.uri(),
                route
            );
            return Verdict::Rejected;
        }

        log::debug!("{}: rerouting {} to {}", self.inner.name, req.uri(), route);
        if let Err(e) = set_path_and_query(req, route, "") {
            log::warn!("{}: could not reroute to {}: {}", self.inner.name, route, e);
            return Verdict::Rejected;
        }
        Verdict::Rerouted(route.clone())
    }
}

fn header_name(name: &str) -> Result<HeaderName, ApiKeyConfigError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiKeyConfigError::InvalidHeaderName {
        name: name.to_string(),
    })
}

/// Lowers the location toggles into the ordered source list.
fn sources(config: &ApiKeyConfig) -> Result<Vec<ApiKeySource>, ApiKeyConfigError> {
    let mut sources = Vec::with_capacity(4);
    if config.authentication_header {
        sources.push(ApiKeySource::Header(header_name(
            &config.authentication_header_name,
        )?));
    }
    if config.bearer_header {
        sources.push(ApiKeySource::Bearer(header_name(&config.bearer_header_name)?));
    }
    if config.query_param {
        sources.push(ApiKeySource::Query(config.query_param_name.clone()));
    }
    if config.path_segment {
        sources.push(ApiKeySource::PathSegment(config.path_segment_mode));
    }
    Ok(sources)
}
