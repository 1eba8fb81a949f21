use crate::model::season::{TermCounts, TermHistory};
use serde::{Deserialize, Serialize};

/// Display name used when the course listing gives none
pub const UNKNOWN_COURSE_NAME: &str = "Unknown";

/// An academic subject and the link to its course list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Short code, e.g. "CS"
    pub name: String,

    /// Absolute URL of the subject's course-list document
    pub link: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }

    /// Whether `code` is usable as a subject code
    ///
    /// Codes double as file names, so only ASCII alphanumerics, `-` and `_`
    /// are allowed.
    pub fn is_valid_code(code: &str) -> bool {
        !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

/// One course as written to the subject's JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub subject: String,
    pub number: u32,
    pub name: String,
    pub counts: TermCounts,
    pub all_terms: Vec<String>,
}

impl Course {
    /// Combines a course's identity fields with its term history
    pub fn new(subject: &str, number: u32, name: Option<String>, history: TermHistory) -> Self {
        Self {
            subject: subject.to_string(),
            number,
            name: name.unwrap_or_else(|| UNKNOWN_COURSE_NAME.to_string()),
            counts: history.counts,
            all_terms: history.all_terms,
        }
    }
}

/// All courses collected for one subject in one run, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseData {
    pub subject: String,
    pub courses: Vec<Course>,
}

impl CourseData {
    pub fn new(subject: impl Into<String>, courses: Vec<Course>) -> Self {
        Self {
            subject: subject.into(),
            courses,
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
