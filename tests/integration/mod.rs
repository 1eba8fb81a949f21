//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small fake catalog and exercise the
//! crawler against it end-to-end.

mod common;
mod subjects_tests;
