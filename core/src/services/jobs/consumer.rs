//! Job consumer: pulls one job at a time and dispatches it

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use nudge_shared::QueueConfig;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, Instrument};

use crate::domain::entities::job::{Job, JobOutcome};
use crate::errors::JobError;

use super::traits::{FailureHandler, JobHandler, JobSource};

/// Consumer tuning
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// How long each wait for a delivery may block
    pub poll_timeout: Duration,
    /// Pause after the source reports it is unavailable
    pub error_backoff: Duration,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(5),
            error_backoff: Duration::from_secs(1),
        }
    }
}

impl ConsumerConfig {
    pub fn from_queue_config(config: &QueueConfig) -> Self {
        Self {
            poll_timeout: Duration::from_secs(config.poll_timeout),
            ..Default::default()
        }
    }
}

/// Per-job state: `Idle -> Processing -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Idle,
    Processing,
}

/// Counters since the consumer was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub completed: u64,
    pub failed: u64,
}

/// Consumes a single named queue with an effective concurrency of one
///
/// Failed jobs are reported to the failure handler and never retried.
pub struct JobConsumer<S, H, F> {
    source: S,
    handler: H,
    failure_handler: F,
    config: ConsumerConfig,
    processing: AtomicBool,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl<S, H, F> JobConsumer<S, H, F>
where
    S: JobSource,
    H: JobHandler,
    F: FailureHandler,
{
    pub fn new(source: S, handler: H, failure_handler: F, config: ConsumerConfig) -> Self {
        Self {
            source,
            handler,
            failure_handler,
            config,
            processing: AtomicBool::new(false),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> ConsumerState {
        if self.processing.load(Ordering::Acquire) {
            ConsumerState::Processing
        } else {
            ConsumerState::Idle
        }
    }

    pub fn stats(&self) -> ConsumerStats {
        ConsumerStats {
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Wait for one delivery and dispatch it
    ///
    /// # Returns
    /// * `Ok(Some(outcome))` - A delivery was received and handled (or reported as failed)
    /// * `Ok(None)` - Nothing arrived within the poll timeout
    /// * `Err(JobError::Source)` - The source is unavailable; nothing was consumed
    pub async fn process_next(&self) -> Result<Option<JobOutcome>, JobError> {
        match self.source.next_job(self.config.poll_timeout).await {
            Ok(Some(job)) => Ok(Some(self.dispatch(job).await)),
            Ok(None) => Ok(None),
            Err(error @ JobError::MalformedPayload { .. }) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.failure_handler.on_failed(None, &error);
                Ok(Some(JobOutcome::Failed { job_id: None, error }))
            }
            Err(error) => Err(error),
        }
    }

    /// Run the job handler for a delivered job
    pub async fn dispatch(&self, job: Job) -> JobOutcome {
        let span = info_span!("job", queue = %self.source.queue_name(), job_id = %job.id, job_name = %job.name);

        async move {
            self.processing.store(true, Ordering::Release);
            let result = self.handler.handle(&job).await;
            self.processing.store(false, Ordering::Release);

            match result {
                Ok(()) => {
                    self.completed.fetch_add(1, Ordering::Relaxed);
                    debug!("Job completed");
                    JobOutcome::Completed { job_id: job.id }
                }
                Err(error) => {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                    self.failure_handler.on_failed(Some(&job), &error);
                    JobOutcome::Failed {
                        job_id: Some(job.id),
                        error,
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Consume until `shutdown` becomes `true`
    ///
    /// The signal is checked between deliveries, so a job that has been
    /// received always runs to completion.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(queue = %self.source.queue_name(), "Job consumer started");

        loop {
            let stop = *shutdown.borrow();
            if stop {
                break;
            }

            match self.process_next().await {
                Ok(_) => {}
                Err(e) => {
                    error!(queue = %self.source.queue_name(), error = %e, "Failed to receive job");
                    // A closed channel disables the second branch; fall back to the sleep
                    tokio::select! {
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                        Ok(()) = shutdown.changed() => {}
                    }
                }
            }
        }

        let stats = self.stats();
        info!(
            queue = %self.source.queue_name(),
            completed = stats.completed,
            failed = stats.failed,
            "Job consumer stopped"
        );
    }
}
