use crate::error::{BumpError, Result};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Local checkout, used only to read remote configuration
pub struct LocalRepository {
    repo: Git2Repo,
}

impl LocalRepository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(LocalRepository { repo })
    }

    /// Fetch URL of a named remote
    pub fn remote_url(&self, name: &str) -> Result<String> {
        let remote = self
            .repo
            .find_remote(name)
            .map_err(|e| {
                BumpError::configuration(format!("Cannot find remote '{}': {}", name, e))
            })?;

        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| BumpError::configuration(format!("Remote '{}' has no valid URL", name)))
    }
}
