//! Fallback link resolution
//!
//! The catalog advertises links that are not always live. Resolution walks an
//! ordered list of candidates and settles on the first one that answers.

use crate::config::LatestPolicy;
use crate::crawler::fetcher::CatalogClient;

/// Returns the first candidate that answers with a 2xx status
///
/// Candidates are probed strictly in the given order, one at a time. A
/// candidate that times out, fails to connect, or answers with any other
/// status is skipped. Returns None when the list is empty or nothing works;
/// an empty list costs no requests.
pub async fn resolve_first_working(client: &CatalogClient, urls: &[String]) -> Option<String> {
    for url in urls {
        match client.probe(url).await {
            Ok(()) => {
                tracing::debug!("Resolved working link {}", url);
                return Some(url.clone());
            }
            Err(e) => {
                tracing::debug!("Candidate unavailable: {}", e);
            }
        }
    }

    None
}

/// Resolves the most recent working link under `policy`
///
/// `links` must be in document order; the policy decides which end is
/// treated as newest before fallback resolution runs.
pub async fn resolve_latest(
    client: &CatalogClient,
    links: Vec<String>,
    policy: LatestPolicy,
) -> Option<String> {
    let candidates = policy.arrange(links);
    resolve_first_working(client, &candidates).await
}
