//! Shared fixtures for the integration tests

use catalog_harvest::config::{Config, HttpConfig};
use catalog_harvest::crawler::{build_http_client, CatalogClient, RetryPolicy};
use catalog_harvest::model::CourseData;
use catalog_harvest::output::{CatalogSink, OutputError, OutputResult};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// HTTP settings suitable for a local mock server
pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        user_agent: "TestHarvester/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
        max_retries: 0,
        retry_delay_ms: 0,
    }
}

/// A client that never retries
pub fn test_client() -> CatalogClient {
    let client = build_http_client(&test_http_config()).expect("Failed to build client");
    CatalogClient::new(client, RetryPolicy::none())
}

/// A configuration pointing at `server`'s `/catalog.xml`
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.catalog.root_url = format!("{}/catalog.xml", server.uri());
    config.http = test_http_config();
    config.crawler.max_concurrent_courses = 4;
    config
}

/// An XML response
pub fn xml(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "application/xml")
}

/// Serves `body` as XML for GET requests to `route`
pub async fn mount_xml(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(xml(body))
        .mount(server)
        .await;
}

/// Answers GET requests to `route` with `status` and no body
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Number of requests the server has seen for `route`
pub async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

/// Catalog root listing the given calendar years (`(id, href)` pairs)
pub fn root_doc(years: &[(&str, String)]) -> String {
    let items: String = years
        .iter()
        .map(|(id, href)| format!(r#"<calendarYear id="{}" href="{}">{}</calendarYear>"#, id, href, id))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:schedule xmlns:ns2="http://rest.cis.illinois.edu"><calendarYears>{}</calendarYears></ns2:schedule>"#,
        items
    )
}

/// Calendar year document listing the given terms (`(label, href)` pairs)
pub fn year_doc(terms: &[(&str, String)]) -> String {
    let items: String = terms
        .iter()
        .map(|(label, href)| format!(r#"<term id="{}" href="{}">{}</term>"#, label, href, label))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:calendarYear xmlns:ns2="http://rest.cis.illinois.edu"><terms>{}</terms></ns2:calendarYear>"#,
        items
    )
}

/// Term document listing the given subjects (`(code, href)` pairs)
pub fn term_doc(subjects: &[(&str, String)]) -> String {
    let items: String = subjects
        .iter()
        .map(|(code, href)| format!(r#"<subject id="{}" href="{}">{} Department</subject>"#, code, href, code))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:term xmlns:ns2="http://rest.cis.illinois.edu"><subjects>{}</subjects></ns2:term>"#,
        items
    )
}

/// Subject document listing courses (`(id, href, name)` triples)
pub fn subject_doc(courses: &[(&str, Option<String>, &str)]) -> String {
    let items: String = courses
        .iter()
        .map(|(id, href, name)| match href {
            Some(href) => format!(r#"<course id="{}" href="{}">{}</course>"#, id, href, name),
            None => format!(r#"<course id="{}">{}</course>"#, id, name),
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:subject xmlns:ns2="http://rest.cis.illinois.edu"><courses>{}</courses></ns2:subject>"#,
        items
    )
}

/// Course detail document listing past offering labels
pub fn history_doc(labels: &[&str]) -> String {
    let items: String = labels
        .iter()
        .map(|label| format!("<course>{}</course>", label))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:termHistory xmlns:ns2="http://rest.cis.illinois.edu"><terms>{}</terms></ns2:termHistory>"#,
        items
    )
}

/// Sink that keeps everything in memory
#[derive(Default)]
pub struct MemorySink {
    pub index: Mutex<Option<Vec<String>>>,
    pub course_data: Mutex<Vec<CourseData>>,
    pub last_updated: Mutex<Option<DateTime<Utc>>>,
}

impl MemorySink {
    pub fn index(&self) -> Option<Vec<String>> {
        self.index.lock().unwrap().clone()
    }

    pub fn subjects_written(&self) -> Vec<String> {
        self.course_data
            .lock()
            .unwrap()
            .iter()
            .map(|data| data.subject.clone())
            .collect()
    }

    pub fn data_for(&self, subject: &str) -> Option<CourseData> {
        self.course_data
            .lock()
            .unwrap()
            .iter()
            .find(|data| data.subject == subject)
            .cloned()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.lock().unwrap()
    }

    pub fn is_untouched(&self) -> bool {
        self.index().is_none()
            && self.course_data.lock().unwrap().is_empty()
            && self.last_updated().is_none()
    }
}

impl CatalogSink for MemorySink {
    fn write_subject_index(&self, subjects: &[String]) -> OutputResult<()> {
        *self.index.lock().unwrap() = Some(subjects.to_vec());
        Ok(())
    }

    fn write_course_data(&self, data: &CourseData) -> OutputResult<()> {
        self.course_data.lock().unwrap().push(data.clone());
        Ok(())
    }

    fn write_last_updated(&self, at: DateTime<Utc>) -> OutputResult<()> {
        *self.last_updated.lock().unwrap() = Some(at);
        Ok(())
    }
}

/// Sink that fails the writes it is told to fail and records the rest
#[derive(Default)]
pub struct FailingSink {
    pub inner: MemorySink,
    pub fail_subject: Option<String>,
    pub fail_index: bool,
    pub fail_timestamp: bool,
}

fn write_failure(what: &str) -> OutputError {
    OutputError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("refusing to write {}", what),
    ))
}

impl CatalogSink for FailingSink {
    fn write_subject_index(&self, subjects: &[String]) -> OutputResult<()> {
        if self.fail_index {
            return Err(write_failure("subject index"));
        }
        self.inner.write_subject_index(subjects)
    }

    fn write_course_data(&self, data: &CourseData) -> OutputResult<()> {
        if self.fail_subject.as_deref() == Some(data.subject.as_str()) {
            return Err(write_failure(&data.subject));
        }
        self.inner.write_course_data(data)
    }

    fn write_last_updated(&self, at: DateTime<Utc>) -> OutputResult<()> {
        if self.fail_timestamp {
            return Err(write_failure("timestamp"));
        }
        self.inner.write_last_updated(at)
    }
}
