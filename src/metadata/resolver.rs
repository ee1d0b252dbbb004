//! Resolution orchestrator.
//!
//! The [`LinkResolver`] turns a URL into a [`MetadataTriple`]:
//!
//! - **Step A** fetches the page and runs the extractor.
//! - **Step B** asks the summarization service for a summary. It runs
//!   concurrently with step A; the rest of the summary chain then uses the
//!   description step A produced.
//! - **Step C** merges both into the triple.
//!
//! Every step has its own fallback, and a panic anywhere inside a resolution
//! is caught and replaced with the degraded triple, so callers always get a
//! usable value.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use linkmeta_common::{
    MetadataCandidate, MetadataTriple, PlaceholderReason, Provenance, Resolution,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::extractor::extract;
use super::summary::{SummaryResolver, PIPELINE_FAILURE_SUMMARY};
use crate::config::{Config, FetchConfig};
use crate::fetch::{Fetch, HttpFetcher};

/// Top-level entry point of the pipeline.
///
/// Holds no per-resolution state; concurrent calls share only the fetcher.
///
/// # Examples
///
/// ```no_run
/// use linkmeta::config::Config;
/// use linkmeta::metadata::LinkResolver;
///
/// # async fn run() {
/// let resolver = LinkResolver::new(&Config::default());
/// let triple = resolver.resolve("https://www.rust-lang.org/").await;
/// println!("{} | {} | {}", triple.title, triple.favicon, triple.summary);
/// # }
/// ```
pub struct LinkResolver {
    fetcher: Arc<dyn Fetch>,
    fetch: FetchConfig,
    summaries: SummaryResolver,
}

impl LinkResolver {
    /// Create a resolver backed by an [`HttpFetcher`].
    pub fn new(config: &Config) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFetcher::new(&config.fetch)))
    }

    /// Create a resolver with a custom fetcher.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetch>) -> Self {
        let summaries = SummaryResolver::new(
            fetcher.clone(),
            config.fetch.clone(),
            config.summary.clone(),
        );
        Self {
            fetcher,
            fetch: config.fetch.clone(),
            summaries,
        }
    }

    /// Resolve `url` into a triple. Never fails.
    pub async fn resolve(&self, url: &str) -> MetadataTriple {
        self.resolve_detailed(url).await.triple
    }

    /// Resolve `url`, also reporting where the summary came from.
    pub async fn resolve_detailed(&self, url: &str) -> Resolution {
        match AssertUnwindSafe(self.run(url)).catch_unwind().await {
            Ok(resolution) => resolution,
            Err(_) => {
                error!(stage = "resolve", url, "Resolution panicked; returning degraded triple");
                Resolution {
                    triple: MetadataTriple::degraded(url, PIPELINE_FAILURE_SUMMARY),
                    provenance: Provenance::Placeholder(PlaceholderReason::PipelineFailure),
                }
            }
        }
    }

    /// Resolve `url` unless `cancel` fires first.
    ///
    /// On cancellation the in-flight fetches are dropped and `None` is
    /// returned. Other resolutions are unaffected.
    pub async fn resolve_until_cancelled(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Option<Resolution> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(stage = "resolve", url, "Resolution cancelled");
                None
            }
            resolution = self.resolve_detailed(url) => Some(resolution),
        }
    }

    async fn run(&self, url: &str) -> Resolution {
        debug!(stage = "resolve", url, "Starting resolution");

        let (candidate, external) =
            tokio::join!(self.candidate(url), self.summaries.external_summary(url));

        let summary = self
            .summaries
            .complete(url, external, &candidate.description)
            .await;

        let resolution = Resolution {
            triple: MetadataTriple {
                title: candidate.title,
                favicon: candidate.favicon,
                summary: summary.text,
            },
            provenance: summary.provenance,
        };

        info!(
            stage = "resolve",
            url,
            title = %resolution.triple.title,
            has_favicon = !resolution.triple.favicon.is_empty(),
            provenance = resolution.provenance.as_str(),
            "Resolved link metadata"
        );
        resolution
    }

    /// Step A: fetch and extract, degrading on transport failure.
    async fn candidate(&self, url: &str) -> MetadataCandidate {
        match self.fetcher.fetch(self.fetch.request(url)).await {
            Ok(page) => extract(&page.body, url),
            Err(e) => {
                warn!(stage = "extract", url, error = %e, "Page fetch failed; using URL as title");
                MetadataCandidate::degraded(url)
            }
        }
    }
}
