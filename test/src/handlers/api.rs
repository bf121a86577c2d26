//! API routes (behind the API key middleware).

use actix_web::{get, HttpRequest, HttpResponse, Responder};

use actix_key_auth_core::http::security::AuthenticatedKey;

/// Header the middleware forwards the matched key in.
pub const FORWARD_HEADER: &str = "X-Auth-Key";

/// Reports how the caller authenticated.
#[get("/api/whoami")]
pub async fn whoami(key: AuthenticatedKey) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "source": key.get_source().to_string(),
    }))
}

/// Echoes what reached the downstream handler after sanitizing.
#[get("/api/echo")]
pub async fn echo(req: HttpRequest) -> impl Responder {
    let forwarded = req
        .headers()
        .get(FORWARD_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some();

    HttpResponse::Ok().json(serde_json::json!({
        "path": req.path(),
        "query": req.query_string(),
        "forwarded": forwarded,
    }))
}
