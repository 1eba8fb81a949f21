//! Output module for persisting harvest results
//!
//! This module handles:
//! - The sink interface the coordinator writes through
//! - The flat JSON file sink
//! - Run statistics and the end-of-run summary

mod json_output;
pub mod stats;
mod traits;

pub use json_output::JsonFileSink;
pub use stats::{print_summary, RunStatus, RunSummary, SubjectFailure, SubjectReport};
pub use traits::{CatalogSink, OutputError, OutputResult};
