//! API Key configuration.

use serde::Deserialize;

use super::error::ApiKeyConfigError;

/// How keys are looked up in the URL path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSegmentMode {
    /// The key may appear anywhere in the path (`/abcdef` matches key `abc`).
    #[default]
    Substring,
    /// The key must be a whole path segment.
    Segment,
}

/// Configuration for API Key authentication.
///
/// Field names follow the host configuration surface, so a JSON document
/// such as `{"keys": ["sk_live_abc123"], "queryParam": false}` deserializes
/// directly. Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiKeyConfig {
    /// Look for the key in a dedicated header.
    pub authentication_header: bool,
    /// Name of the dedicated header.
    #[serde(rename = "headerName")]
    pub authentication_header_name: String,
    /// Look for a `Bearer <key>` authorization header.
    pub bearer_header: bool,
    /// Name of the bearer header.
    pub bearer_header_name: String,
    /// Look for the key in a query parameter.
    pub query_param: bool,
    /// Name of the query parameter.
    pub query_param_name: String,
    /// Look for the key in the URL path.
    pub path_segment: bool,
    /// Path matching policy.
    pub path_segment_mode: PathSegmentMode,
    /// Strip the query parameter after a successful match.
    pub remove_query_params_on_success: bool,
    /// Allowed keys.
    pub keys: Vec<String>,
    /// Strip the key header after a successful match.
    pub remove_headers_on_success: bool,
    /// Header carrying the matched key downstream; empty disables it.
    pub internal_forward_header_name: String,
    /// Path unauthenticated requests are rewritten to; empty disables it.
    pub internal_error_route: String,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            authentication_header: true,
            authentication_header_name: "X-API-KEY".to_string(),
            bearer_header: true,
            bearer_header_name: "Authorization".to_string(),
            query_param: true,
            query_param_name: "token".to_string(),
            path_segment: true,
            path_segment_mode: PathSegmentMode::default(),
            remove_query_params_on_success: true,
            keys: Vec::new(),
            remove_headers_on_success: true,
            internal_forward_header_name: String::new(),
            internal_error_route: String::new(),
        }
    }
}

impl ApiKeyConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ApiKeyConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the allowed keys.
    pub fn keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }

    /// Adds one allowed key.
    pub fn add_key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Enables the dedicated header source under the given name.
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.authentication_header = true;
        self.authentication_header_name = name.into();
        self
    }

    /// Enables the bearer source under the given header name.
    pub fn bearer(mut self, name: impl Into<String>) -> Self {
        self.bearer_header = true;
        self.bearer_header_name = name.into();
        self
    }

    /// Enables the query parameter source under the given name.
    pub fn query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param = true;
        self.query_param_name = name.into();
        self
    }

    /// Enables the path source with the given policy.
    pub fn path_segment(mut self, mode: PathSegmentMode) -> Self {
        self.path_segment = true;
        self.path_segment_mode = mode;
        self
    }

    pub fn disable_header(mut self) -> Self {
        self.authentication_header = false;
        self
    }

    pub fn disable_bearer(mut self) -> Self {
        self.bearer_header = false;
        self
    }

    pub fn disable_query_param(mut self) -> Self {
        self.query_param = false;
        self
    }

    pub fn disable_path_segment(mut self) -> Self {
        self.path_segment = false;
        self
    }

    /// Sets whether the key header is stripped on success.
    pub fn remove_headers_on_success(mut self, remove: bool) -> Self {
        self.remove_headers_on_success = remove;
        self
    }

    /// Sets whether the key query parameter is stripped on success.
    pub fn remove_query_params_on_success(mut self, remove: bool) -> Self {
        self.remove_query_params_on_success = remove;
        self
    }

    /// Sets the header that carries the matched key downstream.
    pub fn forward_header(mut self, name: impl Into<String>) -> Self {
        self.internal_forward_header_name = name.into();
        self
    }

    /// Sets the path unauthenticated requests are rewritten to.
    ///
    /// Rerouting needs the middleware to wrap the whole `App`. Wrapped
    /// around a `Scope`, unauthenticated requests get the `403` response
    /// instead.
    pub fn error_route(mut self, path: impl Into<String>) -> Self {
        self.internal_error_route = path.into();
        self
    }
}
