use serde::Deserialize;

/// Seed URL used when no configuration file overrides it
pub const DEFAULT_SEED_URL: &str = "https://example.com/";

/// The single domain the crawl is confined to by default
pub const DEFAULT_ALLOWED_DOMAIN: &str = "example.com";

/// Default page-count ceiling
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "productData.db";

/// URL substrings that are never followed (cache busters, image paths,
/// messenger deep links)
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["cache", "image", "t.me", "wa.me"];

/// Main configuration structure for Shelf-Crawler
///
/// Every section falls back to the built-in defaults, so an empty file (or no
/// file at all) describes the stock crawl of `https://example.com/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How the page-count ceiling bounds a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CeilingMode {
    /// The ceiling is checked only between batches; a batch always runs to
    /// completion, so the visited count may overshoot.
    #[default]
    Batch,
    /// The ceiling is also checked before each page and never exceeded.
    Exact,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the frontier is seeded with
    #[serde(rename = "seed-url", default = "default_seed_url")]
    pub seed_url: String,

    /// The only host links are followed on
    #[serde(rename = "allowed-domain", default = "default_allowed_domain")]
    pub allowed_domain: String,

    /// Page-count ceiling
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    #[serde(rename = "ceiling-mode", default)]
    pub ceiling_mode: CeilingMode,

    /// Substrings that exclude a discovered URL from the frontier
    #[serde(rename = "skip-patterns", default = "default_skip_patterns")]
    pub skip_patterns: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: default_seed_url(),
            allowed_domain: default_allowed_domain(),
            max_pages: default_max_pages(),
            ceiling_mode: CeilingMode::default(),
            skip_patterns: default_skip_patterns(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_seed_url() -> String {
    DEFAULT_SEED_URL.to_string()
}

fn default_allowed_domain() -> String {
    DEFAULT_ALLOWED_DOMAIN.to_string()
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_skip_patterns() -> Vec<String> {
    DEFAULT_SKIP_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_crawler_name() -> String {
    "shelf-crawler".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}
