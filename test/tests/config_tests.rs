//! Configuration tests.
//!
//! Covers JSON loading and the checks that run when the middleware is built.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};

use actix_key_auth_core::http::security::middleware::ApiKeyAuth;
use actix_key_auth_core::http::security::{
    ApiKeyConfig, ApiKeyConfigError, PathSegmentMode, SourceKind,
};
use common::{create_test_app, Hits, KEY};

#[::core::prelude::v1::test]
fn test_json_defaults() {
    let config = ApiKeyConfig::from_json(r#"{"keys": ["k1"]}"#).unwrap();

    assert!(config.authentication_header);
    assert_eq!(config.authentication_header_name, "X-API-KEY");
    assert!(config.bearer_header);
    assert_eq!(config.bearer_header_name, "Authorization");
    assert!(config.query_param);
    assert_eq!(config.query_param_name, "token");
    assert!(config.path_segment);
    assert_eq!(config.path_segment_mode, PathSegmentMode::Substring);
    assert!(config.remove_headers_on_success);
    assert!(config.remove_query_params_on_success);
    assert_eq!(config.keys, vec!["k1".to_string()]);
}

#[::core::prelude::v1::test]
fn test_json_full() {
    let json = r#"{
        "authenticationHeader": false,
        "bearerHeader": true,
        "bearerHeaderName": "X-Token",
        "queryParam": false,
        "pathSegment": true,
        "pathSegmentMode": "segment",
        "keys": ["k1", "k2"],
        "internalForwardHeaderName": "X-Auth-Key",
        "internalErrorRoute": "/denied"
    }"#;
    let auth = ApiKeyAuth::new(ApiKeyConfig::from_json(json).unwrap()).unwrap();

    let kinds: Vec<SourceKind> = auth
        .authenticator()
        .get_sources()
        .iter()
        .map(|s| s.kind())
        .collect();
    assert_eq!(kinds, vec![SourceKind::Bearer, SourceKind::PathSegment]);
}

#[::core::prelude::v1::test]
fn test_invalid_json() {
    let err = ApiKeyConfig::from_json("{keys:").unwrap_err();
    assert!(matches!(err, ApiKeyConfigError::Parse(_)));
}

#[::core::prelude::v1::test]
fn test_no_keys() {
    let err = ApiKeyAuth::new(ApiKeyConfig::new()).err().unwrap();
    assert!(matches!(err, ApiKeyConfigError::NoKeys));
    assert_eq!(err.to_string(), "must specify at least one valid key");
}

#[::core::prelude::v1::test]
fn test_no_key_source() {
    let config = ApiKeyConfig::new()
        .add_key(KEY)
        .disable_header()
        .disable_bearer()
        .disable_query_param()
        .disable_path_segment();

    let err = ApiKeyAuth::new(config).err().unwrap();
    assert!(matches!(err, ApiKeyConfigError::NoKeySource));
}

#[::core::prelude::v1::test]
fn test_no_keys_reported_before_no_source() {
    let config = ApiKeyConfig::new()
        .disable_header()
        .disable_bearer()
        .disable_query_param()
        .disable_path_segment();

    let err = ApiKeyAuth::new(config).err().unwrap();
    assert!(matches!(err, ApiKeyConfigError::NoKeys));
}

#[::core::prelude::v1::test]
fn test_bad_error_route() {
    let config = ApiKeyConfig::new().add_key(KEY).error_route("denied");
    let err = ApiKeyAuth::new(config).err().unwrap();
    assert!(matches!(err, ApiKeyConfigError::InvalidErrorRoute { .. }));
}

#[::core::prelude::v1::test]
fn test_bad_header_name() {
    let config = ApiKeyConfig::new().add_key(KEY).header("bad header");
    let err = ApiKeyAuth::new(config).err().unwrap();
    assert!(matches!(err, ApiKeyConfigError::InvalidHeaderName { .. }));
}

#[actix_web::test]
async fn test_json_config_drives_middleware() {
    let json = format!(
        r#"{{"keys": ["{}"], "authenticationHeader": false, "queryParamName": "api_key"}}"#,
        KEY
    );
    let config = ApiKeyConfig::from_json(&json).unwrap();
    let hits = web::Data::new(Hits::default());
    let app = test::init_service(create_test_app(config, hits.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-KEY", KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/data?api_key={}", KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(hits.api(), 1);
}
