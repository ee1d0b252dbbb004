//! Link metadata resolution pipeline.
//!
//! This module turns a user-supplied URL into a [`MetadataTriple`] (title,
//! favicon, summary) while tolerating slow, broken or missing sites and an
//! unreliable summarization service.
//!
//! # Module layout
//!
//! - [`cascade`] -- Ordered first-non-empty-wins rule evaluation.
//! - [`extractor`] -- Title, favicon and description cascades over parsed HTML.
//! - [`summary`] -- Summary fallback chain (service, description, paragraphs, placeholder).
//! - [`resolver`] -- Orchestrator that runs the above and merges their output.
//!
//! [`MetadataTriple`]: linkmeta_common::MetadataTriple

pub mod cascade;
pub mod extractor;
pub mod resolver;
pub mod summary;

#[cfg(test)]
mod test_fixtures;

pub use extractor::{extract, extract_paragraphs, resolve_favicon};
pub use resolver::LinkResolver;
pub use summary::{normalize_summary, SummaryResolver};
