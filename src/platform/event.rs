//! Workflow event context.
//!
//! Reads the pull request number a run was triggered for from the event
//! payload (`GITHUB_EVENT_PATH`) or, failing that, from `GITHUB_REF`.

use crate::error::{BumpError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// Pull request context of the triggering event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub pull_request: Option<u64>,
}

impl EventContext {
    /// Build the context from the workflow environment.
    ///
    /// A missing or non pull request event yields an empty context; an event file
    /// that exists but cannot be parsed is an error.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var("GITHUB_EVENT_PATH") {
            if !path.is_empty() {
                let context = Self::from_event_file(&path)?;
                if context.pull_request.is_some() {
                    return Ok(context);
                }
            }
        }

        let from_ref = std::env::var("GITHUB_REF")
            .ok()
            .and_then(|github_ref| parse_pr_number(&github_ref));
        debug!(pull_request = ?from_ref, "Event context from GITHUB_REF");

        Ok(EventContext {
            pull_request: from_ref,
        })
    }

    /// Parse an event payload file
    pub fn from_event_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_payload(&raw).map_err(|e| {
            BumpError::configuration(format!(
                "Cannot parse event payload {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse an event payload document
    pub fn from_payload(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        let payload: EventPayload = serde_json::from_str(raw)?;
        let pull_request = payload
            .pull_request
            .map(|pr| pr.number)
            .or(payload.number);
        Ok(EventContext { pull_request })
    }
}

/// Extract PR number from `GITHUB_REF` (e.g., "refs/pull/123/merge" -> 123)
pub fn parse_pr_number(github_ref: &str) -> Option<u64> {
    github_ref
        .strip_prefix("refs/pull/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_pr_number() {
        assert_eq!(parse_pr_number("refs/pull/123/merge"), Some(123));
        assert_eq!(parse_pr_number("refs/pull/7/head"), Some(7));
        assert_eq!(parse_pr_number("refs/heads/main"), None);
        assert_eq!(parse_pr_number("refs/pull/abc/merge"), None);
    }

    #[test]
    fn test_payload_pull_request_event() {
        let payload = r#"{"action":"labeled","number":42,"pull_request":{"number":42}}"#;
        let context = EventContext::from_payload(payload).unwrap();
        assert_eq!(context.pull_request, Some(42));
    }

    #[test]
    fn test_payload_without_pull_request() {
        let context = EventContext::from_payload(r#"{"inputs":{"pr-number":"3"}}"#).unwrap();
        assert_eq!(context.pull_request, None);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_event_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"pull_request":{"number":15}}"#).unwrap();
        file.flush().unwrap();

        std::env::set_var("GITHUB_EVENT_PATH", file.path());
        std::env::remove_var("GITHUB_REF");
        let context = EventContext::from_env().unwrap();
        std::env::remove_var("GITHUB_EVENT_PATH");

        assert_eq!(context.pull_request, Some(15));
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_ref() {
        std::env::remove_var("GITHUB_EVENT_PATH");
        std::env::set_var("GITHUB_REF", "refs/pull/99/merge");
        let context = EventContext::from_env().unwrap();
        std::env::remove_var("GITHUB_REF");

        assert_eq!(context.pull_request, Some(99));
    }
}
