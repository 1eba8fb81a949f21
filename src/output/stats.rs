//! Run statistics
//!
//! Counters and timings gathered by the coordinator while a harvest runs.

use crate::crawler::ResolutionExhausted;
use std::time::Duration;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// Every resolved subject was attempted and the timestamp written
    #[default]
    Completed,

    /// The current term lists no subjects (or none matched the filter)
    NoSubjects,

    /// No working year or term link could be found
    ResolutionFailed(ResolutionExhausted),
}

/// A subject harvested successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    pub name: String,
    pub courses: usize,
    pub elapsed: Duration,
}

/// A subject that was skipped after an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFailure {
    pub name: String,
    pub error: String,
}

/// Summary of one harvest run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub status: RunStatus,

    /// Subjects the run set out to process
    pub subjects_total: usize,

    /// Courses written across all successful subjects
    pub courses_total: usize,

    pub completed: Vec<SubjectReport>,
    pub failures: Vec<SubjectFailure>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subject whose courses were written
    pub fn record_success(&mut self, name: &str, courses: usize, elapsed: Duration) {
        self.courses_total += courses;
        self.completed.push(SubjectReport {
            name: name.to_string(),
            courses,
            elapsed,
        });
    }

    /// Records a subject that was skipped
    pub fn record_failure(&mut self, name: &str, error: impl ToString) {
        self.failures.push(SubjectFailure {
            name: name.to_string(),
            error: error.to_string(),
        });
    }

    pub fn subjects_succeeded(&self) -> usize {
        self.completed.len()
    }

    pub fn subjects_failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns the subject success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.subjects_total == 0 {
            return 0.0;
        }
        (self.subjects_succeeded() as f64 / self.subjects_total as f64) * 100.0
    }
}

/// Prints a run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    match &summary.status {
        RunStatus::Completed => println!("Status: completed"),
        RunStatus::NoSubjects => println!("Status: nothing to harvest"),
        RunStatus::ResolutionFailed(reason) => println!("Status: resolution failed ({})", reason),
    }

    println!("  Subjects: {}", summary.subjects_total);
    println!(
        "  Succeeded: {} ({:.1}%)",
        summary.subjects_succeeded(),
        summary.success_rate()
    );
    println!("  Failed: {}", summary.subjects_failed());
    println!("  Courses: {}", summary.courses_total);
    println!("  Elapsed: {:.1}s", summary.elapsed.as_secs_f64());

    if !summary.failures.is_empty() {
        println!("\nFailed Subjects:");
        for failure in &summary.failures {
            println!("  - {}: {}", failure.name, failure.error);
        }
    }
}
