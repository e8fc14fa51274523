//! Pure formatting functions for terminal output.

use console::style;

use crate::orchestration::{ReconcileState, Reconciliation};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
///
/// Human-facing lines go to stderr; stdout carries `name=value` outputs.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One-line description of how a run ended.
pub fn outcome_line(result: &Reconciliation) -> String {
    match result.state() {
        ReconcileState::NoOp => format!(
            "No version change detected for pull request #{} (version {})",
            result.pull_request, result.previous
        ),
        ReconcileState::DryRun => format!(
            "Dry run: pull request #{} would bump {} -> {}",
            result.pull_request, result.previous, result.version
        ),
        ReconcileState::Skipped => format!(
            "Computed {} for pull request #{} (commit skipped)",
            result.version, result.pull_request
        ),
        ReconcileState::Committed => format!(
            "Bumped {} -> {} on pull request #{}",
            result.previous, result.version, result.pull_request
        ),
        ReconcileState::TagOnly => format!(
            "Tagged {} for pull request #{} (commit skipped)",
            result.tag.as_deref().unwrap_or_default(),
            result.pull_request
        ),
        ReconcileState::CommittedAndTagged => format!(
            "Bumped {} -> {} and tagged {} on pull request #{}",
            result.previous,
            result.version,
            result.tag.as_deref().unwrap_or_default(),
            result.pull_request
        ),
    }
}

/// Print the final outcome of a run.
pub fn display_outcome(result: &Reconciliation) {
    let line = outcome_line(result);
    match result.state() {
        ReconcileState::NoOp | ReconcileState::DryRun => display_status(&line),
        _ => display_success(&line),
    }
}

/// Markdown table for the workflow step summary.
pub fn summary_markdown(result: &Reconciliation) -> String {
    let mut out = String::from("### Version bump\n\n| | |\n|---|---|\n");
    out.push_str(&format!("| Pull request | #{} |\n", result.pull_request));
    out.push_str(&format!("| Bump type | {} |\n", result.category));
    out.push_str(&format!("| Previous version | {} |\n", result.previous));
    out.push_str(&format!("| New version | {} |\n", result.version));
    if let Some(sha) = &result.commit_sha {
        out.push_str(&format!("| Commit | {} |\n", sha));
    }
    if let Some(tag) = &result.tag {
        out.push_str(&format!("| Tag | {} |\n", tag));
    }
    if result.dry_run {
        out.push_str("\n_Dry run: no changes were made._\n");
    }
    out
}
