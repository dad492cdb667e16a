//! Redis client for the work queue
//!
//! This module provides a Redis client with connection retry logic and the
//! list operations the work queue is built on. Blocking pops are issued
//! without retry; every other command retries transient failures with
//! exponential backoff.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use nudge_shared::{ConfigError, QueueConfig};

use crate::InfrastructureError;

/// Redis client with connection retry logic
///
/// Cloning is cheap; clones share one multiplexed connection. A blocking
/// pop holds that connection until it returns, so a consumer should own a
/// client that producers do not share.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: QueueConfig,
    /// Maximum number of attempts for retried operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect to the broker described by `config`
    ///
    /// # Arguments
    /// * `config` - Queue broker settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Connected client or error
    ///
    /// # Example
    /// ```no_run
    /// use nudge_infra::RedisClient;
    /// use nudge_shared::QueueConfig;
    ///
    /// async fn connect() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = QueueConfig::new("localhost", 6379);
    ///     Ok(RedisClient::new(config).await?)
    /// }
    /// ```
    pub async fn new(config: QueueConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Connect with a custom retry policy
    ///
    /// # Arguments
    /// * `config` - Queue broker settings
    /// * `max_retries` - Maximum number of attempts
    /// * `retry_delay_ms` - Base delay between attempts in milliseconds
    pub async fn new_with_retry_config(
        config: QueueConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        config.validate()?;

        let url = config.url();
        info!(url = %mask_url(&url), queue = %config.name, "Creating Redis client");

        let client = Client::open(url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            ConfigError::invalid("QUEUE_HOST", format!("invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries.max(1), retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries: max_retries.max(1),
            retry_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Push a value onto the head of a list
    ///
    /// # Returns
    /// * `Result<usize, InfrastructureError>` - Length of the list after the push
    pub async fn lpush(&self, key: &str, value: &str) -> Result<usize, InfrastructureError> {
        debug!("Pushing onto list '{}'", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let value = value.to_string();

                Box::pin(async move { conn.lpush::<_, _, usize>(key, value).await })
            })
            .await;

        result.map_err(|e| {
            error!("Failed to push onto list '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Pop a value from the tail of a list, waiting up to `timeout`
    ///
    /// The timeout is rounded up to whole seconds. A lost reply cannot be
    /// replayed, so this command is never retried.
    ///
    /// # Returns
    /// * `Result<Option<String>, InfrastructureError>` - The popped value, or `None` on timeout
    pub async fn brpop(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<Option<String>, InfrastructureError> {
        let seconds = blocking_timeout_secs(timeout);
        let mut conn = self.connection.clone();

        let reply = redis::cmd("BRPOP")
            .arg(key)
            .arg(seconds)
            .query_async::<_, Option<(String, String)>>(&mut conn)
            .await
            .map_err(|e| {
                error!("Blocking pop on '{}' failed: {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(reply.map(|(_, value)| value))
    }

    /// Length of a list
    pub async fn llen(&self, key: &str) -> Result<usize, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.llen::<_, usize>(key).await })
            })
            .await;

        result.map_err(|e| {
            error!("Failed to read length of '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if key was deleted, false if not found
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await;

        match result {
            Ok(deleted_count) => Ok(deleted_count > 0),
            Err(e) => {
                error!("Failed to delete key '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute a Redis operation with automatic retry logic
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

/// Whole seconds for a blocking pop; zero would block forever
pub(crate) fn blocking_timeout_secs(timeout: Duration) -> u64 {
    let mut seconds = timeout.as_secs();
    if timeout.subsec_nanos() > 0 {
        seconds += 1;
    }
    seconds.max(1)
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
