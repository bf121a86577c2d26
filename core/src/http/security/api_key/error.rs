//! API key configuration errors.

use derive_more::{Display, Error, From};

/// Errors raised while building an [`ApiKeyAuthenticator`](super::ApiKeyAuthenticator).
///
/// These are setup failures: no authenticator is produced and route setup
/// should abort.
#[derive(Debug, Display, Error, From)]
pub enum ApiKeyConfigError {
    /// The allow-list is empty.
    #[display("must specify at least one valid key")]
    NoKeys,

    /// None of the header, bearer, query or path sources is enabled.
    #[display("at least one method must be true")]
    NoKeySource,

    /// An allow-list entry is the empty string.
    #[display("keys must not be empty strings")]
    EmptyKey,

    /// A configured header name is not a valid HTTP header name.
    #[display("invalid header name: {name:?}")]
    InvalidHeaderName {
        name: String,
    },

    /// A key cannot be sent as the value of the forwarding header.
    #[display("keys must be valid header values when a forward header is configured")]
    InvalidKeyValue,

    /// The internal error route is not an absolute path.
    #[display("invalid internal error route: {route:?}")]
    InvalidErrorRoute {
        route: String,
    },

    /// The JSON configuration could not be parsed.
    #[display("invalid configuration: {_0}")]
    #[from]
    Parse(serde_json::Error),
}
