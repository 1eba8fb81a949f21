//! Output sink traits and errors
//!
//! The crawler hands its results to a [`CatalogSink`]; where and how they are
//! stored is up to the implementation.

use crate::model::CourseData;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Subject name {0:?} cannot be used as a file name")]
    InvalidName(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for harvested catalog data
///
/// Every write replaces whatever a previous run stored at the same place.
pub trait CatalogSink {
    /// Stores the list of subject codes processed by this run
    fn write_subject_index(&self, subjects: &[String]) -> OutputResult<()>;

    /// Stores all courses collected for one subject
    fn write_course_data(&self, data: &CourseData) -> OutputResult<()>;

    /// Stores the moment the run finished
    fn write_last_updated(&self, at: DateTime<Utc>) -> OutputResult<()>;
}
