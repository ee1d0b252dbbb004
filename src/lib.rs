//! Linkmeta - Link metadata resolution
//!
//! This library crate exposes the resolution pipeline for embedding and
//! integration testing.

pub mod config;
pub mod fetch;
pub mod metadata;

pub use linkmeta_common::{MetadataTriple, Provenance, Resolution};
pub use metadata::LinkResolver;
