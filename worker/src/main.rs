//! Worker process for the `ai-suggestions` queue
//!
//! Connects to the broker, then hands each delivered job to the logging
//! handler until interrupted. Failed jobs are logged and dropped.

use anyhow::Context;
use tokio::sync::watch;
use tracing::{info, warn};

use nudge_core::services::jobs::{
    ConsumerConfig, JobConsumer, LoggingFailureHandler, LoggingJobHandler,
};
use nudge_infra::RedisJobQueue;
use nudge_shared::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        queue = %config.queue.name,
        "Starting Nudge worker"
    );

    let queue = RedisJobQueue::connect(&config.queue)
        .await
        .context("failed to connect to the work queue")?;

    let consumer = JobConsumer::new(
        queue,
        LoggingJobHandler,
        LoggingFailureHandler,
        ConsumerConfig::from_queue_config(&config.queue),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received, finishing current job");
        let _ = shutdown_tx.send(true);
    });

    consumer.run(shutdown_rx).await;

    Ok(())
}
