//! Resilient outbound retrieval.
//!
//! This module defines the [`Fetch`] trait every pipeline stage talks to, the
//! reqwest-backed [`HttpFetcher`], and the [`BackoffPolicy`] implementations
//! that space out its retries.
//!
//! # Module layout
//!
//! - [`backoff`] -- Retry delay policies (jittered, fixed, exponential).
//! - [`client`] -- The HTTP implementation with browser headers, redirect cap,
//!   per-attempt timeout and retry loop.

pub mod backoff;
pub mod client;

use async_trait::async_trait;
use linkmeta_common::{FetchError, FetchRequest, FetchResult};

pub use backoff::{BackoffPolicy, ExponentialBackoff, FixedBackoff, JitterBackoff};
pub use client::HttpFetcher;

/// Performs a single logical retrieval, retrying internally.
///
/// Implementations return `Ok` for any response below status 500 and only
/// return [`FetchError`] once the request's retry budget is exhausted.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult, FetchError>;
}
