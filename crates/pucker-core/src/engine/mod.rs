//! # Engine Module
//!
//! Shared plumbing for batch puckering analyses: the run configuration, the aggregated
//! error type, and progress reporting hooks that front ends subscribe to.
//!
//! - **Configuration** ([`config`]) - Input directory, chirality groups and ring-index sources
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping the core error types
//! - **Progress Monitoring** ([`progress`]) - Callback-based phase and task reporting

pub mod config;
pub mod error;
pub mod progress;
