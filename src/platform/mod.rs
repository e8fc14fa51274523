//! Hosting platform abstraction layer
//!
//! This module provides a trait-based abstraction over the hosting platform's
//! pull request, content and reference APIs, allowing for a real GitHub
//! implementation and an in-memory mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Platform] trait, which defines the calls the
//! reconciliation needs. The concrete implementations include:
//!
//! - [github::GitHubPlatform]: A real implementation using the `octocrab` crate
//! - [mock::MockPlatform]: A mock implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [Platform] trait rather than concrete
//! implementations to enable easy testing.
//!
//! ```rust
//! # use pr_version_bump::platform::Platform;
//! # async fn example<P: Platform>(platform: &P) -> pr_version_bump::Result<()> {
//! let pr = platform.resolve_pull_request(None).await?;
//! let labels = platform.fetch_labels(pr.number).await?;
//! # Ok(())
//! # }
//! ```

pub mod event;
pub mod github;
pub mod mock;

pub use event::EventContext;
pub use github::{GitHubConfig, GitHubPlatform};
pub use mock::{MockPlatform, PlatformCall};

use crate::domain::{LabelSet, ManifestSnapshot};
use crate::error::Result;
use async_trait::async_trait;

/// Pull request being processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestHandle {
    pub number: u64,
    /// Branch the pull request merges into
    pub base_ref: String,
    /// Branch the pull request was opened from; manifest reads and writes target it
    pub head_ref: String,
    /// Commit at the tip of `head_ref` when the pull request was resolved
    pub head_sha: String,
}

/// Conditional write of an updated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWrite {
    pub path: String,
    pub content: String,
    /// Blob SHA the content was read at; the write is rejected if it is stale
    pub precondition: String,
    pub branch: String,
    pub message: String,
}

/// Hosting platform operations trait
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` so the trait object can be held
/// across `.await` points on a multi-threaded runtime.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map transport
/// and API failures to the matching [crate::error::BumpError] variant:
/// `NotFound`, `Conflict`, `AlreadyExists` or `Upstream`. No method retries.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Resolve the pull request to process
    ///
    /// # Arguments
    /// * `explicit` - Pull request number supplied by configuration, if any
    ///
    /// # Returns
    /// * `Ok(PullRequestHandle)` - Number plus base/head refs
    /// * `Err(Configuration)` - No explicit number and no pull request event context
    /// * `Err(NotFound)` - The pull request does not exist
    async fn resolve_pull_request(&self, explicit: Option<u64>) -> Result<PullRequestHandle>;

    /// Fetch the labels currently attached to a pull request
    async fn fetch_labels(&self, pull_request: u64) -> Result<LabelSet>;

    /// Fetch the manifest at `path`, pinned to `reference`
    ///
    /// # Returns
    /// * `Ok(ManifestSnapshot)` - Parsed document plus its precondition token
    /// * `Err(NotFound)` - No file at that path and reference
    async fn fetch_manifest(&self, path: &str, reference: &str) -> Result<ManifestSnapshot>;

    /// Commit an updated manifest
    ///
    /// # Returns
    /// * `Ok(String)` - SHA of the new commit
    /// * `Err(Conflict)` - The precondition token no longer matches the file
    async fn write_manifest(&self, write: &ManifestWrite) -> Result<String>;

    /// Create `refs/tags/<name>` pointing at `target_sha`
    ///
    /// # Returns
    /// * `Err(AlreadyExists)` - The tag ref already exists
    async fn create_tag_ref(&self, name: &str, target_sha: &str) -> Result<()>;
}
