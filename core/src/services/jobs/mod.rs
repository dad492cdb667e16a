//! Background job dispatch
//!
//! A [`JobConsumer`] pulls jobs from a [`JobSource`] one at a time, hands each
//! to a [`JobHandler`], and reports failures to a [`FailureHandler`]. There is
//! no retry, backoff, or dead-letter path for failed jobs.

mod consumer;
mod handlers;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use consumer::{ConsumerConfig, ConsumerState, ConsumerStats, JobConsumer};
pub use handlers::{LoggingFailureHandler, LoggingJobHandler};
pub use memory::InMemoryJobQueue;
pub use traits::{FailureHandler, JobHandler, JobProducer, JobSource};
