//! Catalog markup parser
//!
//! This module turns a fetched response body into a queryable document and
//! extracts what the crawler needs from it:
//! - Elements by name, in document order
//! - Their `id` attribute, their `href` attribute (resolved to an absolute URL)
//! - Their text content
//!
//! Element names are matched case-insensitively: the tree builder folds names
//! to lowercase, so `calendarYear` and `calendaryear` select the same elements.
//!
//! The tree builder follows HTML rules, where `<course/>` opens an element
//! that is never closed. Empty XML elements are expanded to an explicit
//! open/close pair before building the tree so siblings stay siblings.

use crate::FetchError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use url::Url;

/// An XML empty-element tag: name, quoted attributes, then `/>`
static EMPTY_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<(?P<tag>[A-Za-z_][A-Za-z0-9_:.\-]*)(?P<attrs>(?:\s+[^\s=/>]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*/>"#,
    )
    .expect("empty element pattern is valid")
});

/// One element of interest pulled out of a catalog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The `id` attribute, untouched
    pub id: Option<String>,

    /// The `href` attribute resolved against the document URL
    pub href: Option<String>,

    /// Trimmed text content; None when empty
    pub text: Option<String>,
}

/// A parsed catalog document together with the URL it was loaded from
pub struct CatalogDocument {
    html: Html,
    url: Url,
}

impl CatalogDocument {
    /// Parses a response body
    ///
    /// The tree builder recovers from nearly anything, so a body only counts
    /// as malformed when it is empty or plainly not markup (after trimming
    /// whitespace and a byte-order mark it must start with `<`).
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_harvest::crawler::CatalogDocument;
    /// use url::Url;
    ///
    /// let xml = r#"<subjects><subject id="CS" href="CS.xml">Computer Science</subject></subjects>"#;
    /// let url = Url::parse("https://catalog.example.edu/2021/fall.xml").unwrap();
    /// let doc = CatalogDocument::parse(xml, url).unwrap();
    /// assert_eq!(doc.links("subject"), vec!["https://catalog.example.edu/2021/CS.xml"]);
    /// ```
    pub fn parse(body: &str, url: Url) -> Result<Self, FetchError> {
        let content = body.trim_start_matches('\u{feff}').trim();

        if content.is_empty() {
            return Err(FetchError::Parse {
                url: url.to_string(),
                message: "empty body".to_string(),
            });
        }

        if !content.starts_with('<') {
            return Err(FetchError::Parse {
                url: url.to_string(),
                message: "body is not markup".to_string(),
            });
        }

        Ok(Self {
            html: Html::parse_document(&expand_empty_elements(content)),
            url,
        })
    }

    /// Every element named `element`, in document order
    pub fn entries(&self, element: &str) -> Vec<CatalogEntry> {
        let selector = match Selector::parse(element) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::warn!("Invalid element name {:?}: {:?}", element, e);
                return Vec::new();
            }
        };

        self.html
            .select(&selector)
            .map(|element| self.entry(element))
            .collect()
    }

    /// The resolved `href` of every element named `element`, in document order
    ///
    /// Elements without a usable href are skipped.
    pub fn links(&self, element: &str) -> Vec<String> {
        self.entries(element)
            .into_iter()
            .filter_map(|entry| entry.href)
            .collect()
    }

    /// The text content of every element named `element`, in document order
    ///
    /// Empty elements yield an empty string so positions are preserved.
    pub fn texts(&self, element: &str) -> Vec<String> {
        self.entries(element)
            .into_iter()
            .map(|entry| entry.text.unwrap_or_default())
            .collect()
    }

    fn entry(&self, element: ElementRef<'_>) -> CatalogEntry {
        let value = element.value();
        let text = element.text().collect::<String>().trim().to_string();

        CatalogEntry {
            id: value.attr("id").map(str::to_string),
            href: value
                .attr("href")
                .and_then(|href| resolve_link(href, &self.url)),
            text: Some(text).filter(|t| !t.is_empty()),
        }
    }
}

/// Rewrites every `<name .../>` as `<name ...></name>`
fn expand_empty_elements(content: &str) -> Cow<'_, str> {
    EMPTY_ELEMENT.replace_all(content, "<${tag}${attrs}></${tag}>")
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the href is empty, cannot be joined onto the base URL,
/// or resolves to something other than HTTP(S).
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
