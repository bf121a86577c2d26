//! API key middleware for Actix Web.
//!
//! # Usage
//! ```ignore
//! use actix_web::App;
//! use actix_key_auth_core::http::security::api_key::ApiKeyConfig;
//! use actix_key_auth_core::http::security::middleware::ApiKeyAuth;
//!
//! let auth = ApiKeyAuth::new(
//!     ApiKeyConfig::new()
//!         .add_key("sk_live_abc123")
//!         .error_route("/denied"),
//! )?;
//!
//! App::new()
//!     .wrap(auth)
//!     .service(my_api_endpoint)
//!     .service(denied)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::http::error::AuthError;
use crate::http::security::api_key::{
    ApiKeyAuthenticator, ApiKeyConfig, ApiKeyConfigError, Verdict,
};

/// API key middleware factory.
///
/// Wrap it around an `App` (rather than a scope) when an internal error
/// route is configured: the wrapped service is then the application router,
/// so a rerouted request is dispatched to the handler mounted at that route.
#[derive(Clone)]
pub struct ApiKeyAuth {
    authenticator: ApiKeyAuthenticator,
}

impl ApiKeyAuth {
    /// Validates the configuration and builds the middleware.
    pub fn new(config: ApiKeyConfig) -> Result<Self, ApiKeyConfigError> {
        Ok(Self::from_authenticator(ApiKeyAuthenticator::new(config)?))
    }

    /// Same as [`new`](Self::new), with an instance name used in log lines.
    pub fn named(name: impl Into<String>, config: ApiKeyConfig) -> Result<Self, ApiKeyConfigError> {
        Ok(Self::from_authenticator(ApiKeyAuthenticator::named(
            name, config,
        )?))
    }

    pub fn from_authenticator(authenticator: ApiKeyAuthenticator) -> Self {
        ApiKeyAuth { authenticator }
    }

    pub fn authenticator(&self) -> &ApiKeyAuthenticator {
        &self.authenticator
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            authenticator: self.authenticator.clone(),
            service: Rc::new(service),
        }))
    }
}

/// API key middleware service.
pub struct ApiKeyAuthMiddleware<S> {
    authenticator: ApiKeyAuthenticator,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        match self.authenticator.authenticate(&mut req) {
            // A rerouted request goes back through the wrapped router, which
            // resolves the rewritten path instead of the one originally asked for.
            Verdict::Granted(_) | Verdict::Rerouted(_) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Verdict::Rejected => {
                let response = AuthError::InvalidApiKey
                    .error_response()
                    .map_into_right_body();
                let (http_req, _) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(http_req, response)) })
            }
        }
    }
}
