//! # Workflows Module
//!
//! High-level entry points that run the puckering pipeline over whole datasets and
//! turn the per-structure results into reports.
//!
//! - **Batch Analysis** ([`analyze`]) - Walks a `<data>/<chirality>/<system>/` tree,
//!   analyzes every coordinate file in parallel and collects results and skipped files.
//! - **Reporting** ([`report`]) - Keys the results by system and chirality and writes
//!   them as JSON or CSV.

pub mod analyze;
pub mod report;
