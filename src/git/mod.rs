//! Repository identity
//!
//! Resolves the `owner/repo` slug the platform calls are made against, either
//! from the workflow environment or from the local checkout's remote.

pub mod repository;

pub use repository::LocalRepository;

use crate::error::{BumpError, Result};
use std::fmt;

/// `owner/repo` pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub repo: String,
}

impl RepositorySlug {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepositorySlug {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse an `owner/repo` string such as `GITHUB_REPOSITORY`
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(RepositorySlug::new(owner, repo))
            }
            _ => Err(BumpError::configuration(format!(
                "Invalid repository '{}' - expected owner/repo",
                slug
            ))),
        }
    }

    /// Parse a GitHub remote URL (SSH or HTTPS)
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let rest = url
            .strip_prefix("git@github.com:")
            .or_else(|| url.strip_prefix("ssh://git@github.com/"))
            .or_else(|| url.strip_prefix("https://github.com/"))?;
        let path = rest.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        RepositorySlug::parse(path).ok()
    }

    /// Slug from `GITHUB_REPOSITORY`, falling back to the `origin` remote of the
    /// repository containing the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(slug) = std::env::var("GITHUB_REPOSITORY") {
            if !slug.is_empty() {
                return RepositorySlug::parse(&slug);
            }
        }

        let local = LocalRepository::open(".")?;
        let url = local.remote_url("origin")?;
        RepositorySlug::from_remote_url(&url).ok_or_else(|| {
            BumpError::configuration(format!(
                "Cannot determine repository: GITHUB_REPOSITORY is unset \
                 and '{}' is not a GitHub remote",
                url
            ))
        })
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
