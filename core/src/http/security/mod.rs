//! Security module providing API key authentication.
//!
//! # Module Structure
//!
//! - `api_key` - Key matching, configuration and the authenticator
//! - `extractor` - Actix Web extractors (AuthenticatedKey, OptionalKey)
//! - `middleware` - API key middleware (ApiKeyAuth)

pub use api_key::{
    ApiKeyAuthenticator, ApiKeyConfig, ApiKeyConfigError, ApiKeyIdentity, ApiKeySource,
    PathSegmentMode, SourceKind, Verdict,
};
pub use extractor::{AuthenticatedKey, OptionalKey};
pub use middleware::ApiKeyAuth;

// Internal modules (private implementation details)
mod extractor;

// Public modules
pub mod api_key;
pub mod middleware;
