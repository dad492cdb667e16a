//! Application state and factory
//!
//! This module holds the state shared by request handlers and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};
use nudge_core::services::token::TokenService;
use nudge_shared::Environment;

use crate::routes::health::health_check;

/// State shared by all workers
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(token_service: TokenService, environment: Environment) -> Self {
        Self {
            token_service: Arc::new(token_service),
            environment,
        }
    }
}

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": "The requested resource was not found"
            }))
        }))
}
