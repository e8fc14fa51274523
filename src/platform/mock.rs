use crate::domain::{LabelSet, ManifestSnapshot};
use crate::error::{BumpError, Result};
use crate::platform::{ManifestWrite, Platform, PullRequestHandle};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A call received by [MockPlatform], in order of arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    ResolvePullRequest(Option<u64>),
    FetchLabels(u64),
    FetchManifest { path: String, reference: String },
    WriteManifest(ManifestWrite),
    CreateTagRef { name: String, target_sha: String },
}

impl PlatformCall {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            PlatformCall::WriteManifest(_) | PlatformCall::CreateTagRef { .. }
        )
    }
}

#[derive(Default)]
struct MockState {
    pull_requests: HashMap<u64, PullRequestHandle>,
    event_pull_request: Option<u64>,
    labels: HashMap<u64, Vec<String>>,
    // path -> (content, blob sha)
    manifests: HashMap<String, (String, String)>,
    tags: HashSet<String>,
    calls: Vec<PlatformCall>,
    stale_after_fetch: bool,
    revision: u64,
}

/// Mock platform for testing without network access
pub struct MockPlatform {
    state: Mutex<MockState>,
}

impl MockPlatform {
    /// Create a new empty mock platform
    pub fn new() -> Self {
        MockPlatform {
            state: Mutex::new(MockState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread cannot leave the state half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a pull request that can be resolved by number
    pub fn add_pull_request(&self, handle: PullRequestHandle) {
        self.state().pull_requests.insert(handle.number, handle);
    }

    /// Pretend the run was triggered by an event for this pull request
    pub fn set_event_pull_request(&self, number: u64) {
        self.state().event_pull_request = Some(number);
    }

    /// Set the labels attached to a pull request
    pub fn set_labels<I, S>(&self, pull_request: u64, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state()
            .labels
            .insert(pull_request, labels.into_iter().map(Into::into).collect());
    }

    /// Add a manifest file with its blob SHA
    pub fn add_manifest(
        &self,
        path: impl Into<String>,
        content: impl Into<String>,
        sha: impl Into<String>,
    ) {
        self.state()
            .manifests
            .insert(path.into(), (content.into(), sha.into()));
    }

    /// Add a pre-existing tag ref
    pub fn add_tag(&self, name: impl Into<String>) {
        self.state().tags.insert(name.into());
    }

    /// Simulate a concurrent writer: every manifest fetch is immediately
    /// followed by another commit to the same file.
    pub fn expire_precondition_after_fetch(&self, enabled: bool) {
        self.state().stale_after_fetch = enabled;
    }

    /// Current content of a manifest, if present
    pub fn manifest_content(&self, path: &str) -> Option<String> {
        self.state()
            .manifests
            .get(path)
            .map(|(content, _)| content.clone())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.state().tags.contains(name)
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state().calls.clone()
    }

    /// Manifest writes received so far (successful or not)
    pub fn writes(&self) -> Vec<ManifestWrite> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::WriteManifest(write) => Some(write.clone()),
                _ => None,
            })
            .collect()
    }

    /// Tag creations received so far as `(name, target_sha)`
    pub fn tag_requests(&self) -> Vec<(String, String)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::CreateTagRef { name, target_sha } => {
                    Some((name.clone(), target_sha.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn mutating_call_count(&self) -> usize {
        self.state().calls.iter().filter(|c| c.is_mutating()).count()
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn resolve_pull_request(&self, explicit: Option<u64>) -> Result<PullRequestHandle> {
        let mut state = self.state();
        state.calls.push(PlatformCall::ResolvePullRequest(explicit));

        let number = explicit.or(state.event_pull_request).ok_or_else(|| {
            BumpError::configuration(
                "No pull request number given and the event is not a pull request",
            )
        })?;

        state
            .pull_requests
            .get(&number)
            .cloned()
            .ok_or_else(|| BumpError::not_found(format!("Pull request #{} not found", number)))
    }

    async fn fetch_labels(&self, pull_request: u64) -> Result<LabelSet> {
        let mut state = self.state();
        state.calls.push(PlatformCall::FetchLabels(pull_request));

        Ok(state
            .labels
            .get(&pull_request)
            .map(|labels| LabelSet::new(labels.iter().cloned()))
            .unwrap_or_default())
    }

    async fn fetch_manifest(&self, path: &str, reference: &str) -> Result<ManifestSnapshot> {
        let mut state = self.state();
        state.calls.push(PlatformCall::FetchManifest {
            path: path.to_string(),
            reference: reference.to_string(),
        });

        let (content, sha) = state
            .manifests
            .get(path)
            .cloned()
            .ok_or_else(|| BumpError::not_found(format!("'{}' not found at {}", path, reference)))?;

        if state.stale_after_fetch {
            state.revision += 1;
            let concurrent_sha = format!("concurrent-{}", state.revision);
            if let Some(entry) = state.manifests.get_mut(path) {
                entry.1 = concurrent_sha;
            }
        }

        ManifestSnapshot::parse(path, &content, sha)
    }

    async fn write_manifest(&self, write: &ManifestWrite) -> Result<String> {
        let mut state = self.state();
        state.calls.push(PlatformCall::WriteManifest(write.clone()));

        let current_sha = match state.manifests.get(&write.path) {
            Some((_, sha)) => sha.clone(),
            None => {
                return Err(BumpError::not_found(format!("'{}' not found", write.path)));
            }
        };

        if current_sha != write.precondition {
            return Err(BumpError::conflict(format!(
                "{} does not match {}",
                write.path, write.precondition
            )));
        }

        state.revision += 1;
        let revision = state.revision;
        state.manifests.insert(
            write.path.clone(),
            (write.content.clone(), format!("blob-{}", revision)),
        );
        Ok(format!("commit-{}", revision))
    }

    async fn create_tag_ref(&self, name: &str, target_sha: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(PlatformCall::CreateTagRef {
            name: name.to_string(),
            target_sha: target_sha.to_string(),
        });

        if !state.tags.insert(name.to_string()) {
            return Err(BumpError::already_exists(format!(
                "Reference refs/tags/{} already exists",
                name
            )));
        }
        Ok(())
    }
}
