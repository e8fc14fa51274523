//! GitHub implementation of [`Platform`].

use crate::domain::{LabelSet, ManifestSnapshot};
use crate::error::{BumpError, Result};
use crate::git::RepositorySlug;
use crate::platform::{EventContext, ManifestWrite, Platform, PullRequestHandle};
use async_trait::async_trait;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;
use tracing::{debug, info};

/// Configuration for the GitHub platform client.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Token used for every API call
    pub token: String,
    pub repository: RepositorySlug,
    pub event: EventContext,
}

impl GitHubConfig {
    /// Creates a configuration, rejecting an empty token.
    pub fn new(
        token: impl Into<String>,
        repository: RepositorySlug,
        event: EventContext,
    ) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BumpError::configuration("GitHub token is required"));
        }
        Ok(GitHubConfig {
            token,
            repository,
            event,
        })
    }

    /// Creates configuration from the workflow environment: repository from
    /// `GITHUB_REPOSITORY` (or the local `origin` remote), event context from
    /// `GITHUB_EVENT_PATH` / `GITHUB_REF`.
    pub fn from_env(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BumpError::configuration("GitHub token is required"));
        }
        let repository = RepositorySlug::discover()?;
        let event = EventContext::from_env()?;
        GitHubConfig::new(token, repository, event)
    }
}

/// GitHub REST API backed platform.
pub struct GitHubPlatform {
    client: Octocrab,
    config: GitHubConfig,
}

impl GitHubPlatform {
    /// Creates an authenticated client.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()
            .map_err(|e| {
                BumpError::configuration(format!("Failed to create GitHub client: {}", e))
            })?;
        Ok(GitHubPlatform { client, config })
    }

    pub fn repository(&self) -> &RepositorySlug {
        &self.config.repository
    }

    fn owner(&self) -> &str {
        &self.config.repository.owner
    }

    fn repo(&self) -> &str {
        &self.config.repository.repo
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn resolve_pull_request(&self, explicit: Option<u64>) -> Result<PullRequestHandle> {
        let number = explicit.or(self.config.event.pull_request).ok_or_else(|| {
            BumpError::configuration(
                "No pull request number given and the event is not a pull request",
            )
        })?;

        debug!(repository = %self.config.repository, number, "Fetching pull request");
        let pr = self
            .client
            .pulls(self.owner(), self.repo())
            .get(number)
            .await
            .map_err(|e| BumpError::from_octocrab(&format!("fetch pull request #{}", number), e))?;

        Ok(PullRequestHandle {
            number: pr.number,
            base_ref: pr.base.ref_field.clone(),
            head_ref: pr.head.ref_field.clone(),
            head_sha: pr.head.sha.clone(),
        })
    }

    async fn fetch_labels(&self, pull_request: u64) -> Result<LabelSet> {
        let page = self
            .client
            .issues(self.owner(), self.repo())
            .list_labels_for_issue(pull_request)
            .per_page(100)
            .send()
            .await
            .map_err(|e| BumpError::from_octocrab("fetch labels", e))?;

        let labels: LabelSet = page.items.into_iter().map(|label| label.name).collect();
        debug!(pull_request, count = labels.len(), "Fetched labels");
        Ok(labels)
    }

    async fn fetch_manifest(&self, path: &str, reference: &str) -> Result<ManifestSnapshot> {
        let items = self
            .client
            .repos(self.owner(), self.repo())
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await
            .map_err(|e| BumpError::from_octocrab(&format!("fetch {}", path), e))?;

        let file = items
            .items
            .into_iter()
            .next()
            .ok_or_else(|| BumpError::not_found(format!("'{}' not found at {}", path, reference)))?;

        let content = file.decoded_content().ok_or_else(|| {
            BumpError::manifest(format!("'{}' is not a file with readable content", path))
        })?;

        ManifestSnapshot::parse(path, &content, file.sha)
    }

    async fn write_manifest(&self, write: &ManifestWrite) -> Result<String> {
        let update = self
            .client
            .repos(self.owner(), self.repo())
            .update_file(
                &write.path,
                &write.message,
                write.content.as_bytes(),
                &write.precondition,
            )
            .branch(&write.branch)
            .send()
            .await
            .map_err(|e| BumpError::from_octocrab(&format!("commit {}", write.path), e))?;

        info!(
            path = %write.path,
            branch = %write.branch,
            commit = %update.commit.sha,
            "Committed manifest"
        );
        Ok(update.commit.sha)
    }

    async fn create_tag_ref(&self, name: &str, target_sha: &str) -> Result<()> {
        self.client
            .repos(self.owner(), self.repo())
            .create_ref(&Reference::Tag(name.to_string()), target_sha)
            .await
            .map_err(|e| BumpError::from_octocrab(&format!("create tag {}", name), e))?;

        info!(tag = %name, target = %target_sha, "Created tag");
        Ok(())
    }
}
