//! Catalog root resolution
//!
//! Walks calendar years, then terms, then subjects to find the subject
//! listing for the current term.

use crate::config::CatalogConfig;
use crate::crawler::fetcher::CatalogClient;
use crate::crawler::resolver::resolve_latest;
use crate::model::Subject;
use crate::FetchError;
use thiserror::Error;

/// Element holding one calendar year link in the catalog root
pub const YEAR_ELEMENT: &str = "calendarYear";

/// Element holding one term link in a calendar year document
pub const TERM_ELEMENT: &str = "term";

/// Element holding one subject in a term document
pub const SUBJECT_ELEMENT: &str = "subject";

/// No candidate link worked at one step of the walk
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionExhausted {
    #[error("no working calendar year link among {candidates} candidates")]
    Year { candidates: usize },

    #[error("no working term link among {candidates} candidates in {year_url}")]
    Term { year_url: String, candidates: usize },
}

/// Outcome of walking the catalog down to the subject list
///
/// Keeps "the term lists no subjects" apart from "no term could be reached".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectResolution {
    /// The subject list of the resolved term, in document order
    Resolved(Vec<Subject>),

    /// A year or term step had no working candidate
    ResolutionFailed(ResolutionExhausted),
}

impl SubjectResolution {
    /// The resolved subjects, or an empty slice when resolution failed
    pub fn subjects(&self) -> &[Subject] {
        match self {
            Self::Resolved(subjects) => subjects,
            Self::ResolutionFailed(_) => &[],
        }
    }
}

/// Resolves the subjects of the most recent reachable term
///
/// # Steps
///
/// 1. Load the catalog root and collect calendar year links
/// 2. Pick the newest working year under `config.year_policy`
/// 3. Load that year and collect term links
/// 4. Pick the newest working term under `config.term_policy`
/// 5. Load that term and collect `(id, href)` of every subject
///
/// Subject elements missing either attribute are skipped with a warning.
///
/// # Returns
///
/// * `Ok(SubjectResolution)` - The walk reached a term, or ran out of candidates
/// * `Err(FetchError)` - The root, year, or term document failed to load
pub async fn resolve_subjects(
    client: &CatalogClient,
    config: &CatalogConfig,
) -> Result<SubjectResolution, FetchError> {
    let year_links = client.load(&config.root_url).await?.links(YEAR_ELEMENT);
    let year_candidates = year_links.len();

    let Some(year_url) = resolve_latest(client, year_links, config.year_policy).await else {
        let reason = ResolutionExhausted::Year {
            candidates: year_candidates,
        };
        tracing::error!("Could not resolve a calendar year: {}", reason);
        return Ok(SubjectResolution::ResolutionFailed(reason));
    };
    tracing::info!("Using calendar year {}", year_url);

    let term_links = client.load(&year_url).await?.links(TERM_ELEMENT);
    let term_candidates = term_links.len();

    let Some(term_url) = resolve_latest(client, term_links, config.term_policy).await else {
        let reason = ResolutionExhausted::Term {
            year_url,
            candidates: term_candidates,
        };
        tracing::error!("Could not resolve a term: {}", reason);
        return Ok(SubjectResolution::ResolutionFailed(reason));
    };
    tracing::info!("Using term {}", term_url);

    let entries = client.load(&term_url).await?.entries(SUBJECT_ELEMENT);

    let mut subjects = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry.id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty());
        match (name, entry.href) {
            (Some(name), Some(link)) => subjects.push(Subject::new(name, link)),
            (name, _) => {
                tracing::warn!(
                    "Skipping malformed subject entry #{} ({}) in {}",
                    index,
                    name.as_deref().unwrap_or("no id"),
                    term_url
                );
            }
        }
    }

    tracing::info!("Resolved {} subjects", subjects.len());
    Ok(SubjectResolution::Resolved(subjects))
}

/// Keeps only the subjects whose code appears in `wanted`
///
/// Codes compare case-insensitively. An empty `wanted` keeps everything.
/// Requested codes that are not in the catalog are logged.
pub fn filter_subjects(subjects: Vec<Subject>, wanted: &[String]) -> Vec<Subject> {
    if wanted.is_empty() {
        return subjects;
    }

    for code in wanted {
        if !subjects.iter().any(|s| s.name.eq_ignore_ascii_case(code)) {
            tracing::warn!("Requested subject {} is not in the catalog", code);
        }
    }

    subjects
        .into_iter()
        .filter(|s| wanted.iter().any(|code| s.name.eq_ignore_ascii_case(code)))
        .collect()
}
