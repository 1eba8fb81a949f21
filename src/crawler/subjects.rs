//! Subject course-list extraction

use crate::crawler::fetcher::CatalogClient;
use crate::crawler::parser::CatalogEntry;
use crate::crawler::terms::extract_term_history;
use crate::model::{Course, CourseData, Subject};
use crate::FetchError;
use futures::stream::{self, StreamExt};

/// Element holding one course in a subject's course list
pub const COURSE_ELEMENT: &str = "course";

/// Collects every course listed for `subject`, with its term history
///
/// Term histories are fetched concurrently, at most `max_concurrent` at a
/// time. Results keep the document order of the course list regardless of
/// which request finishes first.
///
/// # Returns
///
/// * `Ok(CourseData)` - One record per listed course; courses whose history
///   could not be fetched carry zero counts
/// * `Err(FetchError)` - The subject's course list itself failed to load
pub async fn extract_course_data(
    client: &CatalogClient,
    subject: &Subject,
    max_concurrent: usize,
) -> Result<CourseData, FetchError> {
    let entries = client.load(&subject.link).await?.entries(COURSE_ELEMENT);
    tracing::debug!("{}: {} courses listed", subject.name, entries.len());

    let subject_name = subject.name.as_str();
    let courses = stream::iter(entries)
        .map(|entry| build_course(client, subject_name, entry))
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(CourseData::new(subject_name, courses))
}

async fn build_course(client: &CatalogClient, subject: &str, entry: CatalogEntry) -> Course {
    let number = parse_course_number(entry.id.as_deref());
    let history = extract_term_history(client, entry.href.as_deref()).await;
    Course::new(subject, number, entry.text, history)
}

/// Course numbers that are absent or not a plain non-negative integer become 0
fn parse_course_number(id: Option<&str>) -> u32 {
    id.and_then(|id| id.trim().parse().ok()).unwrap_or(0)
}
