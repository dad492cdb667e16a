use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use nudge_api::{create_app, AppState};
use nudge_core::services::token::TokenService;
use nudge_shared::{init_tracing, AppConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Missing or invalid settings are fatal before anything is served
    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting Nudge API server");

    let token_service =
        TokenService::new(&config.auth).context("failed to build token service")?;
    info!(
        access_expires_in = token_service.access_token_lifetime(),
        refresh_expires_in = token_service.refresh_token_lifetime(),
        "Token service ready"
    );

    let state = web::Data::new(AppState::new(token_service, config.environment));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
