//! Value types created and discarded within a single resolution.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retries after the first attempt when none is configured.
pub const DEFAULT_FETCH_RETRIES: u32 = 2;

/// Per-attempt timeout when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// HTTP method for a [`FetchRequest`]. Every pipeline retrieval is a GET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound retrieval.
///
/// `url` is user-supplied and untrusted; it is not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    /// Header overrides, applied on top of the fetcher's defaults per field.
    pub headers: Vec<(String, String)>,
    /// Retries after the first attempt.
    pub retries: u32,
    /// Timeout applied to each attempt independently.
    pub timeout: Duration,
}

impl FetchRequest {
    /// A GET request with the default retry budget and timeout.
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            headers: Vec::new(),
            retries: DEFAULT_FETCH_RETRIES,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Add a header override. Later overrides of the same name win.
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts this request may make.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Outcome of a successful transport round trip.
///
/// Any status below 500 counts as success; callers decide what a 4xx body is
/// worth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub status: u16,
    pub body: String,
    /// URL after following redirects.
    pub final_url: String,
    pub content_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Title, favicon and description pulled from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCandidate {
    /// Never empty; falls back to the source URL.
    pub title: String,
    /// Absolute URL, or empty when nothing could be resolved.
    pub favicon: String,
    /// Possibly empty. Feeds the summary cascade, never shown directly.
    pub description: String,
}

impl MetadataCandidate {
    /// Candidate used when the page could not be fetched or parsed.
    pub fn degraded<S: Into<String>>(source_url: S) -> Self {
        Self {
            title: source_url.into(),
            favicon: String::new(),
            description: String::new(),
        }
    }
}

/// Why a placeholder summary was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderReason {
    /// The page was fetched but had no qualifying paragraphs.
    NoContent,
    /// Re-fetching the page for paragraphs failed at the transport level.
    FetchFailed,
    /// The resolution itself failed and the backstop triple was returned.
    PipelineFailure,
}

impl PlaceholderReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderReason::NoContent => "no-content",
            PlaceholderReason::FetchFailed => "fetch-failed",
            PlaceholderReason::PipelineFailure => "pipeline-failure",
        }
    }
}

/// Which fallback step produced a summary. Observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    ExternalService,
    MetaDescription,
    ExtractedParagraphs,
    Placeholder(PlaceholderReason),
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::ExternalService => "external-service",
            Provenance::MetaDescription => "meta-description",
            Provenance::ExtractedParagraphs => "extracted-paragraphs",
            Provenance::Placeholder(_) => "placeholder",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Provenance::Placeholder(_))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Placeholder(reason) => write!(f, "placeholder ({})", reason.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Summary text plus the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// Never empty.
    pub text: String,
    pub provenance: Provenance,
}

impl SummaryResult {
    pub fn new<S: Into<String>>(text: S, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            provenance,
        }
    }
}

/// The pipeline's output, persisted by the caller alongside a bookmark.
///
/// `title` and `summary` are always non-empty; `favicon` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTriple {
    pub title: String,
    pub favicon: String,
    pub summary: String,
}

impl MetadataTriple {
    /// Triple with only the URL as title and the given summary.
    pub fn degraded<U: Into<String>, S: Into<String>>(url: U, summary: S) -> Self {
        Self {
            title: url.into(),
            favicon: String::new(),
            summary: summary.into(),
        }
    }
}

/// A triple together with the provenance of its summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub triple: MetadataTriple,
    pub provenance: Provenance,
}
