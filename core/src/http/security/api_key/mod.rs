//! API Key Authentication for Actix Web.
//!
//! # Overview
//!
//! Clients present a pre-shared key, which is checked against a static
//! allow-list. Keys are looked for in this order, each location can be
//! switched off:
//!
//! 1. **Header**: `X-API-KEY: your-api-key`
//! 2. **Bearer header**: `Authorization: Bearer your-api-key`
//! 3. **Query parameter**: `?token=your-api-key`
//! 4. **Path**: `/your-api-key/resource`
//!
//! The first location holding an allowed key wins. On success the key can be
//! stripped from the request and forwarded in a dedicated header. On failure
//! the caller gets a `403` JSON body, or the request is rewritten to an
//! internal error route.
//!
//! # Usage
//!
//! ```ignore
//! use actix_key_auth_core::http::security::api_key::{ApiKeyConfig, ApiKeyAuthenticator};
//!
//! let config = ApiKeyConfig::from_json(r#"{
//!     "keys": ["sk_live_abc123"],
//!     "queryParam": false,
//!     "internalForwardHeaderName": "X-Auth-Key"
//! }"#)?;
//!
//! let authenticator = ApiKeyAuthenticator::named("public-api", config)?;
//! ```
//!
//! # Security Considerations
//!
//! Path matching defaults to substring containment, so key `abc` also
//! matches `/abcdef/resource`. Use [`PathSegmentMode::Segment`] to require a
//! whole path segment.

mod authenticator;
mod config;
mod error;
pub mod matcher;
mod source;

pub use authenticator::{ApiKeyAuthenticator, ApiKeyIdentity, Verdict};
pub use config::{ApiKeyConfig, PathSegmentMode};
pub use error::ApiKeyConfigError;
pub use source::{ApiKeySource, SourceKind};
