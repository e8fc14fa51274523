//! User interface module - terminal output and workflow annotations.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Workflow command output for the GitHub Actions runner

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_outcome, display_status, display_success, outcome_line,
    summary_markdown,
};

/// Escape a message for a workflow command (`::error::...`).
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Print the failure both for humans and as a runner annotation.
///
/// The annotation is only emitted inside a workflow run.
pub fn report_failure(message: &str) {
    display_error(message);
    if std::env::var_os("GITHUB_ACTIONS").is_some() {
        println!("::error::{}", escape_workflow_data(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_workflow_data() {
        assert_eq!(
            escape_workflow_data("50% done\nnext"),
            "50%25 done%0Anext"
        );
    }
}
