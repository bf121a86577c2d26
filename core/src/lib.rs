//! # Actix Key Auth
//!
//! Static API key authentication middleware for Actix Web.
//!
//! Keys are looked up, in a fixed order, in a dedicated header, a
//! `Bearer` authorization header, a query parameter and the URL path.
//! Matching requests are forwarded (optionally stripped of the key and
//! tagged with a forwarding header); everything else is answered with a
//! `403` JSON body or rerouted to an internal error route.
//!
//! ```ignore
//! use actix_web::App;
//! use actix_key_auth_core::http::security::api_key::ApiKeyConfig;
//! use actix_key_auth_core::http::security::middleware::ApiKeyAuth;
//!
//! let auth = ApiKeyAuth::new(ApiKeyConfig::new().keys(vec!["sk_live_abc123".into()]))?;
//! App::new().wrap(auth)
//! ```

pub mod http;
