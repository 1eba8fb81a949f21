//! Crawler module for catalog traversal and extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP loading with retry and link probing
//! - Markup parsing and element queries
//! - Fallback link resolution
//! - Catalog walking (years, terms, subjects)
//! - Course and term-history extraction
//! - Overall run coordination

mod catalog;
mod coordinator;
mod fetcher;
mod parser;
mod resolver;
mod subjects;
mod terms;

pub use catalog::{
    filter_subjects, resolve_subjects, ResolutionExhausted, SubjectResolution, SUBJECT_ELEMENT,
    TERM_ELEMENT, YEAR_ELEMENT,
};
pub use coordinator::{run_harvest, Coordinator};
pub use fetcher::{build_http_client, CatalogClient, RetryPolicy};
pub use parser::{resolve_link, CatalogDocument, CatalogEntry};
pub use resolver::{resolve_first_working, resolve_latest};
pub use subjects::{extract_course_data, COURSE_ELEMENT};
pub use terms::{extract_term_history, TERM_HISTORY_ELEMENT};
