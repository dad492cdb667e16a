//! # Nudge Core
//!
//! Domain layer for the Nudge backend. It issues and verifies access and
//! refresh tokens and dispatches background jobs from the `ai-suggestions`
//! queue. Broker and transport concerns live in the infrastructure crate.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
