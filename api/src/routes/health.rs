//! Health check endpoint

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::app::AppState;

/// Body returned by `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: String,
    pub tokens: TokenLifetimes,
}

/// Configured token lifetimes in seconds
#[derive(Debug, Serialize)]
pub struct TokenLifetimes {
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "nudge-api",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        tokens: TokenLifetimes {
            access_expires_in: state.token_service.access_token_lifetime(),
            refresh_expires_in: state.token_service.refresh_token_lifetime(),
        },
    })
}
