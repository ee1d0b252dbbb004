//! Linkmeta-Common: Shared data model and error types.
//!
//! This crate provides the values that flow through a link resolution:
//!
//! - **Fetch types**: [`FetchRequest`] and [`FetchResult`] for a single outbound retrieval
//! - **Metadata types**: [`MetadataCandidate`], [`SummaryResult`] and the final [`MetadataTriple`]
//! - **Provenance**: which fallback step produced a summary
//! - **Error Handling**: the [`FetchError`] raised once a retry budget is exhausted
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use linkmeta_common::{FetchRequest, MetadataTriple};
//!
//! let request = FetchRequest::get("https://example.com/article")
//!     .header("Accept", "text/plain")
//!     .retries(1)
//!     .timeout(Duration::from_secs(5));
//! assert_eq!(request.retries, 1);
//!
//! let triple = MetadataTriple::degraded("https://example.com", "Nothing here.");
//! assert_eq!(triple.title, "https://example.com");
//! assert!(triple.favicon.is_empty());
//! ```

pub mod error;
pub mod types;

pub use error::{FetchError, FetchErrorKind};
pub use types::*;
