//! Business services containing domain logic and use cases.

pub mod jobs;
pub mod token;

// Re-export commonly used types
pub use jobs::{
    ConsumerConfig, ConsumerState, ConsumerStats, FailureHandler, InMemoryJobQueue, JobConsumer,
    JobHandler, JobProducer, JobSource, LoggingFailureHandler, LoggingJobHandler,
};
pub use token::TokenService;
