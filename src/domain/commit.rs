use crate::domain::template;
use crate::domain::Version;

/// Default commit message for the manifest update
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: bump version to {{version}}";

/// Commit message template for the manifest update.
///
/// `{{version}}` and `{{new-version}}` render the new version,
/// `{{previous-version}}` the version being replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessageTemplate {
    pattern: String,
}

impl CommitMessageTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        CommitMessageTemplate {
            pattern: pattern.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn render(&self, previous: &Version, next: &Version) -> String {
        let next = next.to_string();
        let previous = previous.to_string();
        template::render(
            &self.pattern,
            &[
                ("version", &next),
                ("new-version", &next),
                ("previous-version", &previous),
            ],
        )
    }
}

impl Default for CommitMessageTemplate {
    fn default() -> Self {
        CommitMessageTemplate::new(DEFAULT_COMMIT_MESSAGE)
    }
}
