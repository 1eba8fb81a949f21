//! Term-history extraction
//!
//! A course's detail document lists every past offering as a `course`
//! element whose text is a term label such as "Fall 2019".

use crate::crawler::fetcher::CatalogClient;
use crate::model::TermHistory;

/// Element holding one past-offering label in a course detail document
pub const TERM_HISTORY_ELEMENT: &str = "course";

/// Fetches and tallies the offering history behind `course_link`
///
/// Never fails: a missing link yields an empty history without any request,
/// and a load or parse failure is logged and also yields an empty history.
pub async fn extract_term_history(client: &CatalogClient, course_link: Option<&str>) -> TermHistory {
    let Some(link) = course_link else {
        return TermHistory::empty();
    };

    match client.load(link).await {
        Ok(document) => TermHistory::from_labels(document.texts(TERM_HISTORY_ELEMENT)),
        Err(e) => {
            tracing::warn!("Term history unavailable: {}", e);
            TermHistory::empty()
        }
    }
}
