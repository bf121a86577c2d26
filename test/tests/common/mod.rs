//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Test keys and configuration
//! - Test app builder
//! - Handlers that record what reached them

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{get, web, App, Error, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use actix_key_auth_core::http::security::api_key::ApiKeyConfig;
use actix_key_auth_core::http::security::middleware::ApiKeyAuth;
use actix_key_auth_core::http::security::{AuthenticatedKey, OptionalKey};

// =============================================================================
// Test Configuration
// =============================================================================

pub const KEY: &str = "sk_live_abc123";
pub const OTHER_KEY: &str = "sk_live_def456";

pub const FORBIDDEN_BODY: &str = r#"{"message":"Invalid or missing API Key","status_code":403}"#;

/// Configuration with every location enabled and both test keys allowed.
pub fn test_config() -> ApiKeyConfig {
    ApiKeyConfig::new().keys(vec![KEY.into(), OTHER_KEY.into()])
}

/// Counts how often each handler ran.
#[derive(Default)]
pub struct Hits {
    api: AtomicUsize,
    denied: AtomicUsize,
}

impl Hits {
    pub fn api(&self) -> usize {
        self.api.load(Ordering::SeqCst)
    }

    pub fn denied(&self) -> usize {
        self.denied.load(Ordering::SeqCst)
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

// =============================================================================
// Test Handlers
// =============================================================================

/// Echoes the request as the downstream handler sees it.
pub async fn echo(req: HttpRequest, key: OptionalKey, hits: web::Data<Hits>) -> impl Responder {
    hits.api.fetch_add(1, Ordering::SeqCst);

    HttpResponse::Ok().json(json!({
        "path": req.path(),
        "query": req.query_string(),
        "key": key.as_ref().map(|k| k.get_key().to_string()),
        "source": key.as_ref().map(|k| k.get_source().to_string()),
        "x_api_key": header(&req, "X-API-KEY"),
        "authorization": header(&req, "Authorization"),
        "x_auth_key": header(&req, "X-Auth-Key"),
    }))
}

#[get("/api/whoami")]
pub async fn whoami(key: AuthenticatedKey) -> impl Responder {
    HttpResponse::Ok().body(format!("{} via {}", key.get_key(), key.get_source()))
}

#[get("/denied")]
pub async fn denied(req: HttpRequest, hits: web::Data<Hits>) -> impl Responder {
    hits.denied.fetch_add(1, Ordering::SeqCst);

    HttpResponse::Unauthorized().json(json!({
        "path": req.path(),
        "query": req.query_string(),
    }))
}

// =============================================================================
// Test App Builder
// =============================================================================

/// Creates an application with the API key middleware wrapping the router.
///
/// `/api/data` and everything under `/v1/` echo the request back.
pub fn create_test_app(
    config: ApiKeyConfig,
    hits: web::Data<Hits>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let auth = ApiKeyAuth::new(config).expect("valid test configuration");

    App::new()
        .app_data(hits)
        .wrap(auth)
        .route("/api/data", web::get().to(echo))
        .route("/v1/{tail:.*}", web::get().to(echo))
        .service(whoami)
        .service(denied)
}
