//! Job entity carried on the work queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A named unit of asynchronous work with an opaque payload
///
/// Jobs are serialized as JSON on the queue. Delivery is at-least-once, so
/// a handler may see the same `id` more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Producer-assigned identifier
    pub id: String,

    /// Job name, used by handlers to pick behaviour
    pub name: String,

    /// Arbitrary payload
    #[serde(default)]
    pub data: Value,

    /// Number of processing attempts already made
    #[serde(default)]
    pub attempts_made: u32,

    /// When the producer placed the job on the queue
    #[serde(default = "Utc::now")]
    pub enqueued_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: impl Into<String>, name: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data,
            attempts_made: 0,
            enqueued_at: Utc::now(),
        }
    }

    /// Creates a job with a random UUID identifier
    pub fn with_generated_id(name: impl Into<String>, data: Value) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, data)
    }

    /// Encodes the job for the wire
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a job from the wire
    pub fn from_payload(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

/// Result of dispatching a single delivery
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The handler returned successfully
    Completed { job_id: String },

    /// The handler failed, or the delivery could not be decoded (`job_id` is `None`)
    Failed {
        job_id: Option<String>,
        error: crate::errors::JobError,
    },
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }

    pub fn job_id(&self) -> Option<&str> {
        match self {
            JobOutcome::Completed { job_id } => Some(job_id),
            JobOutcome::Failed { job_id, .. } => job_id.as_deref(),
        }
    }
}
