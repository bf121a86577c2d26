//! Extractors for accessing the matched API key in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::api_key::ApiKeyIdentity;

/// Extractor for the API key that authenticated the request.
///
/// # Usage
/// ```ignore
/// use actix_key_auth_core::http::security::AuthenticatedKey;
///
/// async fn handler(key: AuthenticatedKey) -> impl Responder {
///     format!("Authenticated via {}", key.get_source())
/// }
/// ```
///
/// # Errors
/// Returns the `403` API key rejection if the request was not authenticated.
#[derive(Debug, Clone)]
pub struct AuthenticatedKey(ApiKeyIdentity);

impl AuthenticatedKey {
    pub fn new(identity: ApiKeyIdentity) -> Self {
        AuthenticatedKey(identity)
    }

    pub fn into_inner(self) -> ApiKeyIdentity {
        self.0
    }
}

impl Deref for AuthenticatedKey {
    type Target = ApiKeyIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedKey {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<ApiKeyIdentity>().cloned() {
            Some(identity) => ready(Ok(AuthenticatedKey(identity))),
            None => ready(Err(AuthError::InvalidApiKey)),
        }
    }
}

/// Optional extractor for the matched API key.
///
/// Yields `None` on unauthenticated requests (for instance on the internal
/// error route) instead of failing.
#[derive(Debug, Clone)]
pub struct OptionalKey(Option<ApiKeyIdentity>);

impl OptionalKey {
    pub fn into_inner(self) -> Option<ApiKeyIdentity> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalKey {
    type Target = Option<ApiKeyIdentity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<ApiKeyIdentity>().cloned();
        ready(Ok(OptionalKey(identity)))
    }
}
