//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts a wiremock server standing in for
//! both the target site and the summarization service, and builds a
//! [`LinkResolver`] wired to it with short timeouts and no backoff delay.

#![allow(dead_code)]

use std::sync::Arc;

use linkmeta::config::Config;
use linkmeta::fetch::{FixedBackoff, HttpFetcher};
use linkmeta::LinkResolver;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the summarization mock answers on.
pub const SUMMARY_PREFIX: &str = "/summary/";

/// Test harness wrapping a mock server and a config pointing at it.
pub struct TestHarness {
    pub server: MockServer,
    pub config: Config,
}

impl TestHarness {
    /// Start a mock server; the summary endpoint points at it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = fast_config(&format!("{}{SUMMARY_PREFIX}", server.uri()));
        Self { server, config }
    }

    /// Absolute URL of `path` on the mock server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.uri())
    }

    /// Resolver using a real HTTP fetcher without backoff delays.
    pub fn resolver(&self) -> LinkResolver {
        resolver_for(&self.config)
    }

    /// Serve `html` at `page_path`.
    pub async fn serve_page(&self, page_path: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html; charset=utf-8"),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer every summarization request with `status` and `body`.
    pub async fn serve_summary(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path_regex(format!("^{SUMMARY_PREFIX}")))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/plain"),
            )
            .mount(&self.server)
            .await;
    }
}

/// Config with one retry, a two second timeout and no backoff window.
pub fn fast_config(summary_endpoint: &str) -> Config {
    let mut config = Config::default();
    config.fetch.retries = 1;
    config.fetch.timeout_secs = 2;
    config.fetch.backoff_min_ms = 0;
    config.fetch.backoff_max_ms = 0;
    config.summary.endpoint = summary_endpoint.to_string();
    config
}

pub fn resolver_for(config: &Config) -> LinkResolver {
    let fetcher = HttpFetcher::with_backoff(&config.fetch, Arc::new(FixedBackoff::none()));
    LinkResolver::with_fetcher(config, Arc::new(fetcher))
}

/// Base URL of a local port nothing listens on.
pub fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let addr = listener.local_addr().expect("failed to get local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn html_page(head: &str, body: &str) -> String {
    format!("<!doctype html><html><head>{head}</head><body>{body}</body></html>")
}

/// A paragraph over the fifty character floor.
pub fn long_paragraph(n: u32) -> String {
    format!("Paragraph {n} talks at length about resilient fetching and graceful fallbacks.")
}
