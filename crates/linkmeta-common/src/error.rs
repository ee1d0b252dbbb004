//! Error types for outbound retrieval.
//!
//! Content-quality problems (an empty page, a short summary) are never errors;
//! they advance a fallback cascade instead. The only failure a fetch can
//! surface is a transport failure after its retry budget is spent.

/// Classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// DNS, connect, TLS, timeout, redirect overflow or a 5xx response.
    Transport,
}

/// Failure raised by a fetcher after exhausting its retry budget.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The resource could not be retrieved.
    #[error("Transport failure fetching {url} after {attempts} attempt(s): {reason}")]
    Transport {
        url: String,
        attempts: u32,
        reason: String,
    },
}

impl FetchError {
    /// Create a new Transport error.
    pub fn transport<U: Into<String>, R: Into<String>>(url: U, attempts: u32, reason: R) -> Self {
        Self::Transport {
            url: url.into(),
            attempts,
            reason: reason.into(),
        }
    }

    /// The error classification.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport { .. } => FetchErrorKind::Transport,
        }
    }

    /// Number of attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Transport { attempts, .. } => *attempts,
        }
    }
}
