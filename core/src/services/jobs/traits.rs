//! Seams between the job consumer and the outside world

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::job::Job;
use crate::errors::JobError;

/// A queue the consumer pulls jobs from
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Wait up to `timeout` for the next job
    ///
    /// # Returns
    /// * `Ok(Some(job))` - A job was delivered
    /// * `Ok(None)` - The wait timed out with nothing queued
    /// * `Err(JobError::MalformedPayload)` - A delivery arrived but could not be decoded
    /// * `Err(JobError::Source)` - The broker could not be reached
    async fn next_job(&self, timeout: Duration) -> Result<Option<Job>, JobError>;

    /// Name of the queue this source reads
    fn queue_name(&self) -> &str;
}

/// A queue producers push jobs onto
#[async_trait]
pub trait JobProducer: Send + Sync {
    async fn enqueue(&self, job: &Job) -> Result<(), JobError>;
}

/// Work performed for each delivered job
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: &Job) -> Result<(), JobError>;
}

/// Callback invoked when a delivery fails
///
/// `job` is `None` when the delivery could not be decoded into a [`Job`].
pub trait FailureHandler: Send + Sync {
    fn on_failed(&self, job: Option<&Job>, error: &JobError);
}
