//! Job queue stored in a Redis list

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use nudge_core::domain::entities::job::Job;
use nudge_core::errors::JobError;
use nudge_core::services::jobs::{JobProducer, JobSource};
use nudge_shared::QueueConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// A named work queue backed by the list at `{prefix}:{queue}:wait`
#[derive(Clone)]
pub struct RedisJobQueue {
    client: RedisClient,
    name: String,
    wait_key: String,
}

impl RedisJobQueue {
    /// Connect to the broker and bind to the configured queue
    pub async fn connect(config: &QueueConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(config.clone()).await?;
        Ok(Self::with_client(client))
    }

    /// Bind an existing client to the queue named in its configuration
    pub fn with_client(client: RedisClient) -> Self {
        let name = client.config().name.clone();
        let wait_key = client.config().wait_key();
        Self {
            client,
            name,
            wait_key,
        }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    pub fn wait_key(&self) -> &str {
        &self.wait_key
    }

    /// Encode and push a job
    ///
    /// # Returns
    /// * `Result<usize, InfrastructureError>` - Number of jobs waiting after the push
    pub async fn push(&self, job: &Job) -> Result<usize, InfrastructureError> {
        let payload = job.to_payload()?;
        let waiting = self.client.lpush(&self.wait_key, &payload).await?;
        debug!(queue = %self.name, job_id = %job.id, waiting, "Job enqueued");
        Ok(waiting)
    }

    /// Number of jobs waiting to be consumed
    pub async fn pending(&self) -> Result<usize, InfrastructureError> {
        self.client.llen(&self.wait_key).await
    }

    /// Drop every waiting job
    pub async fn purge(&self) -> Result<bool, InfrastructureError> {
        let purged = self.client.delete(&self.wait_key).await?;
        if purged {
            info!(queue = %self.name, "Queue purged");
        }
        Ok(purged)
    }
}

#[async_trait]
impl JobProducer for RedisJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<(), JobError> {
        self.push(job).await.map(|_| ()).map_err(into_job_error)
    }
}

#[async_trait]
impl JobSource for RedisJobQueue {
    async fn next_job(&self, timeout: Duration) -> Result<Option<Job>, JobError> {
        match self.client.brpop(&self.wait_key, timeout).await {
            Ok(Some(payload)) => decode_delivery(&payload).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(into_job_error(e)),
        }
    }

    fn queue_name(&self) -> &str {
        &self.name
    }
}

pub(crate) fn decode_delivery(payload: &str) -> Result<Job, JobError> {
    Job::from_payload(payload).map_err(|e| JobError::malformed(e.to_string()))
}

pub(crate) fn into_job_error(error: InfrastructureError) -> JobError {
    match error {
        InfrastructureError::Serialization(e) => JobError::malformed(e.to_string()),
        other => JobError::source(other.to_string()),
    }
}
