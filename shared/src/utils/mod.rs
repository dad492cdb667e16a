//! Common utility functions

pub mod duration;

// Re-export commonly used utilities
pub use duration::{parse_duration, DurationParseError};
