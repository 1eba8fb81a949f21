//! Season classification and per-season offering counts

use serde::{Deserialize, Serialize};

/// One of the four buckets a term label can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Fall,
    Spring,
    Summer,
    Winter,
}

impl Season {
    /// All seasons in classification (and serialization) order
    pub const ALL: [Season; 4] = [Self::Fall, Self::Spring, Self::Summer, Self::Winter];

    /// The literal searched for inside a term label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Winter => "Winter",
        }
    }

    /// Classifies a free-text term label such as "Fall 2019"
    ///
    /// Matching is case-sensitive substring containment, tried in the order of
    /// [`Season::ALL`]; the first hit wins. Returns None when no season name occurs.
    pub fn classify(label: &str) -> Option<Season> {
        Self::ALL
            .into_iter()
            .find(|season| label.contains(season.name()))
    }
}

/// Number of past offerings per season
///
/// Serialized as a `[fall, spring, summer, winter]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct TermCounts {
    pub fall: u32,
    pub spring: u32,
    pub summer: u32,
    pub winter: u32,
}

impl TermCounts {
    /// Increments the bucket for `season`
    pub fn record(&mut self, season: Season) {
        match season {
            Season::Fall => self.fall += 1,
            Season::Spring => self.spring += 1,
            Season::Summer => self.summer += 1,
            Season::Winter => self.winter += 1,
        }
    }

    /// Sum across all four buckets
    pub fn total(&self) -> u32 {
        self.fall + self.spring + self.summer + self.winter
    }
}

impl From<[u32; 4]> for TermCounts {
    fn from([fall, spring, summer, winter]: [u32; 4]) -> Self {
        Self {
            fall,
            spring,
            summer,
            winter,
        }
    }
}

impl From<TermCounts> for [u32; 4] {
    fn from(counts: TermCounts) -> Self {
        [counts.fall, counts.spring, counts.summer, counts.winter]
    }
}

/// A course's offering history: bucketed counts plus every raw label
///
/// `counts.total()` never exceeds `all_terms.len()`; the difference is the
/// number of labels that named no season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermHistory {
    pub counts: TermCounts,
    pub all_terms: Vec<String>,
}

impl TermHistory {
    /// The history of a course with no reachable detail document
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a history from labels in source order, keeping duplicates
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::empty();
        for label in labels {
            history.push(label.into());
        }
        history
    }

    /// Appends one label and counts it if it names a season
    pub fn push(&mut self, label: String) {
        match Season::classify(&label) {
            Some(season) => self.counts.record(season),
            None => tracing::warn!("Unclassified term label: {:?}", label),
        }
        self.all_terms.push(label);
    }

    /// Number of labels that fell into no season bucket
    pub fn unclassified(&self) -> usize {
        self.all_terms.len() - self.counts.total() as usize
    }
}
