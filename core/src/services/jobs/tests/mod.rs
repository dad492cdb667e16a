//! Tests for the job consumer
