//! reqwest-backed [`Fetch`] implementation.
//!
//! Features:
//! - Browser-like default headers, overridable per field.
//! - Redirects followed up to a configured hop count (default 5).
//! - Independent timeout on every attempt (default 15 seconds).
//! - Statuses below 500 are successes; transport errors and 5xx are retried
//!   after a [`BackoffPolicy`] delay.

use std::sync::Arc;

use async_trait::async_trait;
use linkmeta_common::{FetchError, FetchRequest, FetchResult, Method};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CACHE_CONTROL,
    CONNECTION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::redirect::Policy;
use tracing::{debug, warn};

use super::backoff::{BackoffPolicy, JitterBackoff};
use super::Fetch;
use crate::config::{FetchConfig, DEFAULT_USER_AGENT};

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// HTTP fetcher with retry, backoff, timeout and redirect policy.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent resolutions.
///
/// # Examples
///
/// ```no_run
/// use linkmeta::config::FetchConfig;
/// use linkmeta::fetch::{Fetch, HttpFetcher};
///
/// # async fn run() -> Result<(), linkmeta_common::FetchError> {
/// let config = FetchConfig::default();
/// let fetcher = HttpFetcher::new(&config);
/// let page = fetcher.fetch(config.request("https://example.com")).await?;
/// println!("{} {}", page.status, page.final_url);
/// # Ok(())
/// # }
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    default_headers: HeaderMap,
    backoff: Arc<dyn BackoffPolicy>,
}

/// Why a single attempt failed.
enum AttemptError {
    /// Worth another attempt (connect, timeout, 5xx, broken body).
    Retryable(String),
    /// Repeating cannot help (malformed URL, unsupported scheme, redirect loop).
    Fatal(String),
}

impl HttpFetcher {
    /// Create a fetcher with jittered backoff taken from `config`.
    pub fn new(config: &FetchConfig) -> Self {
        Self::with_backoff(config, Arc::new(JitterBackoff::from_config(config)))
    }

    /// Create a fetcher with a custom retry delay policy.
    pub fn with_backoff(config: &FetchConfig, backoff: Arc<dyn BackoffPolicy>) -> Self {
        let client = reqwest::Client::builder()
            .redirect(redirect_policy(config.max_redirects))
            .build()
            .unwrap_or_else(|e| {
                warn!(stage = "fetch", error = %e, "Failed to build HTTP client with redirect policy");
                reqwest::Client::new()
            });

        Self {
            client,
            default_headers: browser_headers(&config.user_agent),
            backoff,
        }
    }

    /// Default headers with the request's overrides applied.
    fn headers_for(&self, request: &FetchRequest) -> HeaderMap {
        let mut headers = self.default_headers.clone();
        for (name, value) in &request.headers {
            let parsed = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            );
            match parsed {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(
                    stage = "fetch",
                    url = %request.url,
                    header = %name,
                    "Skipping invalid header override"
                ),
            }
        }
        headers
    }

    async fn attempt(&self, request: &FetchRequest) -> Result<FetchResult, AttemptError> {
        let resp = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .headers(self.headers_for(request))
            .timeout(request.timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(AttemptError::Retryable(format!(
                "server returned {}",
                status.as_u16()
            )));
        }

        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(classify)?;

        Ok(FetchResult {
            status: status.as_u16(),
            body,
            final_url,
            content_type,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult, FetchError> {
        let max_attempts = request.max_attempts();
        let mut last_reason = String::new();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self.backoff.delay(attempt - 1);
                debug!(
                    stage = "fetch",
                    url = %request.url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            debug!(stage = "fetch", url = %request.url, method = %request.method, attempt, "Sending request");

            match self.attempt(&request).await {
                Ok(result) => {
                    debug!(
                        stage = "fetch",
                        url = %request.url,
                        final_url = %result.final_url,
                        status = result.status,
                        attempt,
                        "Fetch succeeded"
                    );
                    return Ok(result);
                }
                Err(AttemptError::Fatal(reason)) => {
                    warn!(stage = "fetch", url = %request.url, attempt, reason = %reason, "Fetch failed permanently");
                    return Err(FetchError::transport(&request.url, attempt, reason));
                }
                Err(AttemptError::Retryable(reason)) => {
                    warn!(
                        stage = "fetch",
                        url = %request.url,
                        attempt,
                        attempts_left = max_attempts - attempt,
                        reason = %reason,
                        "Fetch attempt failed"
                    );
                    last_reason = reason;
                }
            }
        }

        Err(FetchError::transport(&request.url, max_attempts, last_reason))
    }
}

fn browser_headers(user_agent: &str) -> HeaderMap {
    let user_agent = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
        warn!(stage = "fetch", "Configured user agent is not a valid header value; using default");
        HeaderValue::from_static(DEFAULT_USER_AGENT)
    });

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent);
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Follow at most `max_redirects` hops.
///
/// `previous` already holds the original URL when the first redirect is
/// checked, so `Policy::limited(n)` would stop one hop short.
fn redirect_policy(max_redirects: usize) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            attempt.error(format!("exceeded {max_redirects} redirect(s)"))
        } else {
            attempt.follow()
        }
    })
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
    }
}

fn classify(err: reqwest::Error) -> AttemptError {
    let reason = error_chain(&err);
    if err.is_builder() || err.is_redirect() {
        AttemptError::Fatal(reason)
    } else {
        AttemptError::Retryable(reason)
    }
}

/// reqwest's Display hides the underlying cause (DNS, refused, TLS).
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
