//! Default handlers: log and return

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::entities::job::Job;
use crate::errors::JobError;

use super::traits::{FailureHandler, JobHandler};

/// Logs the job's id, name and payload, then returns
///
/// Placeholder for the suggestion pipeline (external AI call plus result
/// persistence), which has no defined behaviour yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingJobHandler;

#[async_trait]
impl JobHandler for LoggingJobHandler {
    async fn handle(&self, job: &Job) -> Result<(), JobError> {
        info!(
            job_id = %job.id,
            job_name = %job.name,
            data = %job.data,
            "Processing job"
        );
        Ok(())
    }
}

/// Logs the failed job and the error; takes no corrective action
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFailureHandler;

impl FailureHandler for LoggingFailureHandler {
    fn on_failed(&self, job: Option<&Job>, error: &JobError) {
        error!(
            job_id = ?job.map(|j| j.id.as_str()),
            job_name = ?job.map(|j| j.name.as_str()),
            error = %error,
            "Job failed"
        );
    }
}
