use std::time::Duration;

use linkmeta_common::{FetchRequest, DEFAULT_FETCH_RETRIES, DEFAULT_FETCH_TIMEOUT};
use serde::{Deserialize, Serialize};

/// Browser-like user agent; some sites reject anything else.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Summarization endpoint; the percent-encoded target URL is appended.
pub const DEFAULT_SUMMARY_ENDPOINT: &str = "https://r.jina.ai/http://";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt (default: 2)
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Maximum redirect hops before the attempt fails
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Lower bound of the randomized delay before a retry
    #[serde(default = "default_backoff_min_ms")]
    pub backoff_min_ms: u64,

    /// Upper bound of the randomized delay before a retry
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}
fn default_retries() -> u32 {
    DEFAULT_FETCH_RETRIES
}
fn default_max_redirects() -> usize {
    5
}
fn default_backoff_min_ms() -> u64 {
    1000
}
fn default_backoff_max_ms() -> u64 {
    3000
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            max_redirects: default_max_redirects(),
            backoff_min_ms: default_backoff_min_ms(),
            backoff_max_ms: default_backoff_max_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A GET request carrying the configured retry budget and timeout.
    pub fn request(&self, url: &str) -> FetchRequest {
        FetchRequest::get(url)
            .retries(self.retries)
            .timeout(self.timeout())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    /// URL prefix of the summarization service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Service output is truncated to this many characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Service output must be longer than this to be accepted
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Paragraphs must be longer than this to count
    #[serde(default = "default_paragraph_min_chars")]
    pub paragraph_min_chars: usize,

    /// Number of paragraphs joined into a summary
    #[serde(default = "default_paragraph_count")]
    pub paragraph_count: usize,
}

fn default_endpoint() -> String {
    DEFAULT_SUMMARY_ENDPOINT.to_string()
}
fn default_max_chars() -> usize {
    500
}
fn default_min_chars() -> usize {
    50
}
fn default_paragraph_min_chars() -> usize {
    50
}
fn default_paragraph_count() -> usize {
    3
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_chars: default_max_chars(),
            min_chars: default_min_chars(),
            paragraph_min_chars: default_paragraph_min_chars(),
            paragraph_count: default_paragraph_count(),
        }
    }
}

impl SummaryConfig {
    /// Service URL for `target`.
    pub fn service_url(&self, target: &str) -> String {
        format!("{}{}", self.endpoint, urlencoding::encode(target))
    }
}
