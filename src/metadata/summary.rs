//! Summary resolution with an ordered fallback chain.
//!
//! 1. External summarization service (plain text, whitespace-collapsed,
//!    truncated, accepted only above a minimum length).
//! 2. The page's meta description, verbatim.
//! 3. The first qualifying paragraphs of a fresh fetch of the page.
//! 4. A fixed placeholder sentence.
//!
//! Fetch errors inside a step only mean "this step failed"; nothing here
//! returns an error.

use std::sync::Arc;

use linkmeta_common::{PlaceholderReason, Provenance, SummaryResult};
use tracing::{debug, info, warn};

use super::extractor::extract_paragraphs;
use crate::config::{FetchConfig, SummaryConfig};
use crate::fetch::Fetch;

/// Placeholder when the page had no usable paragraphs.
pub const NO_CONTENT_SUMMARY: &str =
    "No summary available. Please visit the website to view the content.";

/// Placeholder when re-fetching the page for paragraphs failed.
pub const FETCH_FAILED_SUMMARY: &str =
    "Could not generate summary. Please visit the website to view the content.";

/// Placeholder returned by the resolver's backstop.
pub const PIPELINE_FAILURE_SUMMARY: &str =
    "Could not fetch content. Please visit the website directly.";

/// Resolves a summary for a URL, always producing usable text.
pub struct SummaryResolver {
    fetcher: Arc<dyn Fetch>,
    fetch: FetchConfig,
    config: SummaryConfig,
}

impl SummaryResolver {
    pub fn new(fetcher: Arc<dyn Fetch>, fetch: FetchConfig, config: SummaryConfig) -> Self {
        Self {
            fetcher,
            fetch,
            config,
        }
    }

    /// Run the whole chain for `source_url`.
    ///
    /// `description` is the extractor's description candidate, possibly empty.
    pub async fn resolve_summary(&self, source_url: &str, description: &str) -> SummaryResult {
        let external = self.external_summary(source_url).await;
        self.complete(source_url, external, description).await
    }

    /// Step 1 on its own, so it can run alongside page extraction.
    ///
    /// Returns `None` on transport failure or output that is too short after
    /// normalization. Any status below 500 is judged on its body alone.
    pub async fn external_summary(&self, source_url: &str) -> Option<String> {
        let service_url = self.config.service_url(source_url);
        let request = self
            .fetch
            .request(&service_url)
            .header("Accept", "text/plain");

        let response = match self.fetcher.fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(stage = "summary", url = source_url, error = %e, "Summarization service unreachable");
                return None;
            }
        };

        let summary = normalize_summary(&response.body, self.config.max_chars);
        let chars = summary.chars().count();
        if chars > self.config.min_chars {
            Some(summary)
        } else {
            debug!(
                stage = "summary",
                url = source_url,
                chars,
                min_chars = self.config.min_chars,
                "Summarization service output too short"
            );
            None
        }
    }

    /// Steps 2-4, given the outcome of step 1.
    pub(crate) async fn complete(
        &self,
        source_url: &str,
        external: Option<String>,
        description: &str,
    ) -> SummaryResult {
        let result = match external {
            Some(text) => SummaryResult::new(text, Provenance::ExternalService),
            None if !description.trim().is_empty() => {
                SummaryResult::new(description, Provenance::MetaDescription)
            }
            None => self.paragraph_summary(source_url).await,
        };

        info!(
            stage = "summary",
            url = source_url,
            provenance = result.provenance.as_str(),
            detail = %result.provenance,
            chars = result.text.chars().count(),
            "Summary resolved"
        );
        result
    }

    async fn paragraph_summary(&self, source_url: &str) -> SummaryResult {
        let page = match self.fetcher.fetch(self.fetch.request(source_url)).await {
            Ok(page) => page,
            Err(e) => {
                warn!(stage = "summary", url = source_url, error = %e, "Paragraph fetch failed");
                return SummaryResult::new(
                    FETCH_FAILED_SUMMARY,
                    Provenance::Placeholder(PlaceholderReason::FetchFailed),
                );
            }
        };

        match extract_paragraphs(
            &page.body,
            self.config.paragraph_min_chars,
            self.config.paragraph_count,
        ) {
            Some(text) => SummaryResult::new(text, Provenance::ExtractedParagraphs),
            None => SummaryResult::new(
                NO_CONTENT_SUMMARY,
                Provenance::Placeholder(PlaceholderReason::NoContent),
            ),
        }
    }
}

/// Collapse whitespace runs to one space, trim, and cap at `max_chars`.
pub fn normalize_summary(raw: &str, max_chars: usize) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}
