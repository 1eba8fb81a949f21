//! Catalog data model
//!
//! Plain data records produced by the crawler and handed to the output sink.

mod course;
mod season;

pub use course::{Course, CourseData, Subject, UNKNOWN_COURSE_NAME};
pub use season::{Season, TermCounts, TermHistory};
