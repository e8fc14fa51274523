//! Label analysis for version bump decisions

pub mod version_resolver;

pub use version_resolver::{Resolution, VersionResolver};
