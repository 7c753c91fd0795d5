use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keywords that mark page text or link text as partner-program related
pub const PARTNER_KEYWORDS: &[&str] = &[
    "partner",
    "partners",
    "partnership",
    "affiliate",
    "affiliates",
    "reseller",
    "resellers",
    "channel-partners",
    "solution-partners",
    "technology-partners",
    "strategic-partners",
];

/// Tokens that mark a text block as likely naming partner companies
pub const PARTNER_NAME_PATTERNS: &[&str] = &[
    "partner:",
    "partners:",
    "including",
    "such as",
    "featured",
    "spotlight",
    "certified",
    "premier",
    "preferred",
    "gold",
    "silver",
    "platinum",
    "trusted",
];

/// Configuration for the WebDriver-backed page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum time to spend loading a single page, in seconds
    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout: u64,

    /// Maximum time to wait for the page body to appear, in seconds
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout: u64,

    /// Maximum fetch attempts per page. Not consulted by the crawl logic.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between fetch attempts, in seconds. Not consulted by the
    /// crawl logic.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
}

impl FetcherConfig {
    /// Page load timeout as a duration
    pub fn page_load_duration(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout)
    }

    /// Readiness wait timeout as a duration
    pub fn ready_duration(&self) -> Duration {
        Duration::from_secs(self.ready_timeout)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            page_load_timeout: default_page_load_timeout(),
            ready_timeout: default_ready_timeout(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default page load timeout in seconds
fn default_page_load_timeout() -> u64 {
    30
}

/// Default readiness wait in seconds
fn default_ready_timeout() -> u64 {
    10
}

/// Default fetch attempt cap
fn default_max_retries() -> u32 {
    3
}

/// Default delay between fetch attempts in seconds
fn default_retry_delay() -> u64 {
    2
}
