//! Domain entities representing core business objects.

pub mod job;
pub mod token;

// Re-export commonly used types
pub use job::{Job, JobOutcome};
pub use token::{Claims, IssuedToken, TokenKind, TokenPair};
