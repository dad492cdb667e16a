//! In-process work queue for tests and local runs

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::domain::entities::job::Job;
use crate::errors::JobError;

use super::traits::{JobProducer, JobSource};

/// FIFO queue holding encoded payloads in memory
///
/// Jobs are stored in their wire encoding so decoding failures surface the
/// same way they do with a real broker.
#[derive(Debug)]
pub struct InMemoryJobQueue {
    name: String,
    pending: Mutex<VecDeque<String>>,
    notify: Notify,
}

impl InMemoryJobQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Push a raw payload without encoding it
    pub async fn push_raw(&self, payload: impl Into<String>) {
        self.pending.lock().await.push_back(payload.into());
        self.notify.notify_one();
    }

    /// Number of deliveries waiting
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}

#[async_trait]
impl JobProducer for InMemoryJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<(), JobError> {
        let payload = job
            .to_payload()
            .map_err(|e| JobError::malformed(e.to_string()))?;
        self.push_raw(payload).await;
        Ok(())
    }
}

#[async_trait]
impl JobSource for InMemoryJobQueue {
    async fn next_job(&self, timeout: Duration) -> Result<Option<Job>, JobError> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(payload) = self.pending.lock().await.pop_front() {
                return Job::from_payload(&payload)
                    .map(Some)
                    .map_err(|e| JobError::malformed(e.to_string()));
            }

            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return Ok(None);
            }
        }
    }

    fn queue_name(&self) -> &str {
        &self.name
    }
}
