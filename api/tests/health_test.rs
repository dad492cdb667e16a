//! Integration tests for the health endpoint

use actix_web::{http::StatusCode, test, web};
use serde_json::Value;

use nudge_api::{create_app, AppState};
use nudge_core::services::token::TokenService;
use nudge_shared::{Environment, JwtConfig};

fn create_state(config: JwtConfig) -> web::Data<AppState> {
    let token_service = TokenService::new(&config).unwrap();
    web::Data::new(AppState::new(token_service, Environment::Development))
}

#[actix_web::test]
async fn test_health_reports_default_token_lifetimes() {
    let state = create_state(JwtConfig::new("access-secret", "refresh-secret"));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "nudge-api");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["tokens"]["access_expires_in"], 900);
    assert_eq!(body["tokens"]["refresh_expires_in"], 604_800);
}

#[actix_web::test]
async fn test_health_reports_configured_lifetimes() {
    let config = JwtConfig::new("access-secret", "refresh-secret")
        .with_access_expiry_seconds(60)
        .with_refresh_expiry_seconds(3_600);
    let app = test::init_service(create_app(create_state(config))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tokens"]["access_expires_in"], 60);
    assert_eq!(body["tokens"]["refresh_expires_in"], 3_600);
}

#[actix_web::test]
async fn test_unknown_route_returns_not_found() {
    let state = create_state(JwtConfig::new("access-secret", "refresh-secret"));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
