//! Dependency freshness audit against a Maven-layout registry.

pub mod client;
pub mod walker;

pub use client::{DEFAULT_REGISTRY_URL, HttpMetadataClient, parse_latest};
pub use walker::{FreshnessOutcome, check_freshness, format_upgrade_line, scan, unique_coordinates};
