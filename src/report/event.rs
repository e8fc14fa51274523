use crate::domain::{BumpCategory, Version};
use std::fmt;

/// Informational events emitted during one reconciliation.
/// None of these are failures; errors travel as `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    PullRequestResolved {
        number: u64,
        head_ref: String,
    },
    ManifestLoaded {
        path: String,
        reference: String,
        version: Version,
    },
    LabelsFetched {
        labels: Vec<String>,
    },
    Resolved {
        category: BumpCategory,
        current: Version,
        next: Version,
    },
    /// Labels from more than one category were present; precedence picked one
    MultipleCategoriesMatched {
        matched: Vec<BumpCategory>,
        selected: BumpCategory,
    },
    NoVersionChange {
        version: Version,
    },
    DryRun {
        version: Version,
    },
    CommitSkipped {
        version: Version,
    },
    ManifestCommitted {
        path: String,
        version: Version,
        commit_sha: String,
    },
    TagCreated {
        name: String,
        target_sha: String,
    },
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEvent::PullRequestResolved { number, head_ref } => {
                write!(f, "Processing pull request #{} ({})", number, head_ref)
            }
            ReportEvent::ManifestLoaded {
                path,
                reference,
                version,
            } => write!(f, "Current version: {} ({} at {})", version, path, reference),
            ReportEvent::LabelsFetched { labels } => {
                if labels.is_empty() {
                    write!(f, "Pull request has no labels")
                } else {
                    write!(f, "Labels: {}", labels.join(", "))
                }
            }
            ReportEvent::Resolved {
                category,
                current,
                next,
            } => write!(f, "Bump type: {} ({} -> {})", category, current, next),
            ReportEvent::MultipleCategoriesMatched { matched, selected } => {
                let names: Vec<&str> = matched.iter().map(BumpCategory::as_str).collect();
                write!(
                    f,
                    "Labels match several bump types ({}); using {}",
                    names.join(", "),
                    selected
                )
            }
            ReportEvent::NoVersionChange { version } => {
                write!(f, "No version change detected (staying at {})", version)
            }
            ReportEvent::DryRun { version } => {
                write!(f, "Dry run: would release {}, no changes made", version)
            }
            ReportEvent::CommitSkipped { version } => {
                write!(f, "Skipping manifest commit for {}", version)
            }
            ReportEvent::ManifestCommitted {
                path,
                version,
                commit_sha,
            } => {
                let short_sha = commit_sha.get(..7).unwrap_or(commit_sha.as_str());
                write!(f, "Committed {} to {} ({})", version, path, short_sha)
            }
            ReportEvent::TagCreated { name, target_sha } => {
                let short_sha = target_sha.get(..7).unwrap_or(target_sha.as_str());
                write!(f, "Created tag {} at {}", name, short_sha)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_display_shortens_sha() {
        let event = ReportEvent::ManifestCommitted {
            path: "package.json".to_string(),
            version: Version::new(2, 0, 0),
            commit_sha: "abc1234def5678".to_string(),
        };
        assert_eq!(event.to_string(), "Committed 2.0.0 to package.json (abc1234)");
    }

    #[test]
    fn test_tag_display_keeps_short_or_non_ascii_sha() {
        let event = ReportEvent::TagCreated {
            name: "v1.0.0".to_string(),
            target_sha: "abc".to_string(),
        };
        assert_eq!(event.to_string(), "Created tag v1.0.0 at abc");

        let event = ReportEvent::TagCreated {
            name: "v1.0.0".to_string(),
            target_sha: "éééé0000".to_string(),
        };
        assert_eq!(event.to_string(), "Created tag v1.0.0 at éééé0000");
    }

    #[test]
    fn test_no_version_change_display() {
        let event = ReportEvent::NoVersionChange {
            version: Version::new(0, 9, 0),
        };
        assert!(event.to_string().contains("No version change detected"));
    }

    #[test]
    fn test_multiple_categories_display() {
        let event = ReportEvent::MultipleCategoriesMatched {
            matched: vec![BumpCategory::Major, BumpCategory::Patch],
            selected: BumpCategory::Major,
        };
        assert_eq!(
            event.to_string(),
            "Labels match several bump types (major, patch); using major"
        );
    }
}
