use serde::Deserialize;

/// Default catalog root used when no configuration overrides it
pub const DEFAULT_ROOT_URL: &str = "https://courses.illinois.edu/cisapp/explorer/catalog.xml";

/// Main configuration structure for Catalog-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which end of a link list is assumed to hold the most recent entry
///
/// The catalog does not promise any ordering, so this is a policy rather
/// than a fact about the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatestPolicy {
    /// The first link in document order is the most recent
    First,
    /// The last link in document order is the most recent
    Last,
}

impl LatestPolicy {
    /// Orders candidate links from most to least recent under this policy
    pub fn arrange(self, mut links: Vec<String>) -> Vec<String> {
        if self == Self::Last {
            links.reverse();
        }
        links
    }
}

/// Where the catalog lives and how to walk it
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// URL of the catalog root document (the calendar year list)
    #[serde(rename = "root-url", default = "default_root_url")]
    pub root_url: String,

    /// Ordering assumption for calendar year links
    #[serde(rename = "year-policy", default = "default_year_policy")]
    pub year_policy: LatestPolicy,

    /// Ordering assumption for term links
    #[serde(rename = "term-policy", default = "default_term_policy")]
    pub term_policy: LatestPolicy,

    /// Restricts the crawl to these subject codes; empty means all
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request deadline (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Extra attempts for a failed document load
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between load attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Crawl fan-out limits
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of in-flight course requests within one subject
    #[serde(
        rename = "max-concurrent-courses",
        default = "default_max_concurrent_courses"
    )]
    pub max_concurrent_courses: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving all JSON files
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the subject index
    #[serde(rename = "subjects-file", default = "default_subjects_file")]
    pub subjects_file: String,

    /// File name of the "last updated" timestamp marker
    #[serde(rename = "last-updated-file", default = "default_last_updated_file")]
    pub last_updated_file: String,
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

fn default_year_policy() -> LatestPolicy {
    LatestPolicy::First
}

fn default_term_policy() -> LatestPolicy {
    LatestPolicy::Last
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_max_concurrent_courses() -> usize {
    16
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_subjects_file() -> String {
    "subjects.json".to_string()
}

fn default_last_updated_file() -> String {
    "last-updated.txt".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            year_policy: default_year_policy(),
            term_policy: default_term_policy(),
            subjects: Vec::new(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_courses: default_max_concurrent_courses(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            subjects_file: default_subjects_file(),
            last_updated_file: default_last_updated_file(),
        }
    }
}
