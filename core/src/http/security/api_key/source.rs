//! Places a key can be presented in.

use std::fmt;

use actix_web::dev::ServiceRequest;
use actix_web::error::HttpError;
use actix_web::http::header::HeaderName;
use actix_web::http::uri::{PathAndQuery, Uri};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use super::config::PathSegmentMode;
use super::matcher::{exact_match, extract_bearer, segment_match, substring_match};

/// The kind of location a key was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Header,
    Bearer,
    Query,
    PathSegment,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Header => "header",
            SourceKind::Bearer => "bearer",
            SourceKind::Query => "query",
            SourceKind::PathSegment => "path",
        };
        f.write_str(name)
    }
}

/// One location to look for the API key in.
///
/// An authenticator holds these in evaluation order and stops at the first
/// one that yields a key from the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// The whole value of a header, e.g. `X-API-KEY: sk_live_abc123`.
    Header(HeaderName),
    /// A `Bearer <key>` header value, e.g. `Authorization: Bearer sk_live_abc123`.
    Bearer(HeaderName),
    /// A query parameter, e.g. `?token=sk_live_abc123`.
    Query(String),
    /// The URL path, e.g. `/sk_live_abc123/resource`.
    PathSegment(PathSegmentMode),
}

impl ApiKeySource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ApiKeySource::Header(_) => SourceKind::Header,
            ApiKeySource::Bearer(_) => SourceKind::Bearer,
            ApiKeySource::Query(_) => SourceKind::Query,
            ApiKeySource::PathSegment(_) => SourceKind::PathSegment,
        }
    }

    /// Returns the allow-list entry presented at this location, if any.
    pub fn find<'k>(&self, req: &ServiceRequest, keys: &'k [String]) -> Option<&'k str> {
        match self {
            ApiKeySource::Header(name) => {
                let value = req.headers().get(name)?.to_str().ok()?;
                exact_match(value, keys)
            }
            ApiKeySource::Bearer(name) => {
                let value = req.headers().get(name)?.to_str().ok()?;
                extract_bearer(value, keys)
            }
            ApiKeySource::Query(name) => {
                let value = query_value(req.query_string(), name)?;
                exact_match(&value, keys)
            }
            ApiKeySource::PathSegment(mode) => {
                let path = percent_decode_str(req.path()).decode_utf8_lossy();
                match mode {
                    PathSegmentMode::Substring => substring_match(&path, keys),
                    PathSegmentMode::Segment => segment_match(&path, keys),
                }
            }
        }
    }
}

/// First value of `name` in a raw query string, percent-decoded.
pub(crate) fn query_value(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Re-encodes a query string, dropping every occurrence of `remove`.
pub(crate) fn encode_query_without(query: &str, remove: Option<&str>) -> String {
    let pairs = form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| remove.map_or(true, |name| k != name));

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Replaces path and query of the request URI, keeping routing in sync.
pub(crate) fn set_path_and_query(
    req: &mut ServiceRequest,
    path: &str,
    query: &str,
) -> Result<(), HttpError> {
    let path_and_query = if query.is_empty() {
        PathAndQuery::try_from(path)?
    } else {
        PathAndQuery::try_from(format!("{}?{}", path, query))?
    };

    let mut parts = req.head().uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    let uri = Uri::from_parts(parts)?;

    req.match_info_mut().get_mut().update(&uri);
    req.head_mut().uri = uri;
    Ok(())
}
