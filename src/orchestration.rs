//! Reconciliation workflow
//!
//! Drives one run: resolve the pull request, read the manifest and labels,
//! decide the bump, then apply at most one manifest write and one tag.

use crate::analyzer::VersionResolver;
use crate::config::ReconcileConfig;
use crate::domain::{BumpCategory, ManifestSnapshot, Version};
use crate::error::Result;
use crate::platform::{ManifestWrite, Platform};
use crate::report::{ReportEvent, Reporter};
use tracing::debug;

pub const OUTPUT_NEW_VERSION: &str = "new-version";
pub const OUTPUT_PULL_REQUEST_NUMBER: &str = "pull-request-number";
pub const OUTPUT_BUMP_TYPE: &str = "bump-type";
pub const OUTPUT_PREVIOUS_VERSION: &str = "previous-version";
pub const OUTPUT_TAG: &str = "tag";

/// Terminal state of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// Labels selected no bump; nothing emitted or mutated
    NoOp,
    /// Outputs emitted, no mutation attempted
    DryRun,
    /// Commit skipped and no tag requested
    Skipped,
    Committed,
    /// Commit skipped, tag created at the unchanged version
    TagOnly,
    CommittedAndTagged,
}

/// Result of a successful reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub pull_request: u64,
    pub category: BumpCategory,
    pub previous: Version,
    /// Version the labels call for, reported even when nothing was written
    pub version: Version,
    pub commit_sha: Option<String>,
    pub tag: Option<String>,
    pub dry_run: bool,
}

impl Reconciliation {
    pub fn state(&self) -> ReconcileState {
        if self.category == BumpCategory::None || self.version == self.previous {
            return ReconcileState::NoOp;
        }
        if self.dry_run {
            return ReconcileState::DryRun;
        }
        match (&self.commit_sha, &self.tag) {
            (Some(_), Some(_)) => ReconcileState::CommittedAndTagged,
            (Some(_), None) => ReconcileState::Committed,
            (None, Some(_)) => ReconcileState::TagOnly,
            (None, None) => ReconcileState::Skipped,
        }
    }
}

/// Applies label-driven version bumps to a pull request.
///
/// Platform calls are issued one at a time in a fixed order and never retried.
/// A failed tag after a successful commit leaves the commit in place.
pub struct ReconciliationOrchestrator<'a, P: ?Sized, R: ?Sized> {
    platform: &'a P,
    reporter: &'a R,
}

impl<'a, P, R> ReconciliationOrchestrator<'a, P, R>
where
    P: Platform + ?Sized,
    R: Reporter + ?Sized,
{
    pub fn new(platform: &'a P, reporter: &'a R) -> Self {
        ReconciliationOrchestrator { platform, reporter }
    }

    pub async fn reconcile(&self, config: &ReconcileConfig) -> Result<Reconciliation> {
        let mode = &config.run_mode;

        let pull_request = self.platform.resolve_pull_request(config.pr_number).await?;
        self.reporter.report(ReportEvent::PullRequestResolved {
            number: pull_request.number,
            head_ref: pull_request.head_ref.clone(),
        });

        let manifest = self
            .platform
            .fetch_manifest(&mode.manifest_path, &pull_request.head_ref)
            .await?;
        let current = manifest.version()?;
        self.reporter.report(ReportEvent::ManifestLoaded {
            path: manifest.path.clone(),
            reference: pull_request.head_ref.clone(),
            version: current,
        });

        let labels = self.platform.fetch_labels(pull_request.number).await?;
        self.reporter.report(ReportEvent::LabelsFetched {
            labels: labels.iter().map(str::to_string).collect(),
        });

        let resolution = VersionResolver::new(config.mapping.clone()).resolve(current, &labels)?;
        if resolution.matched.len() > 1 {
            self.reporter.report(ReportEvent::MultipleCategoriesMatched {
                matched: resolution.matched.clone(),
                selected: resolution.category,
            });
        }

        let mut outcome = Reconciliation {
            pull_request: pull_request.number,
            category: resolution.category,
            previous: current,
            version: resolution.next,
            commit_sha: None,
            tag: None,
            dry_run: mode.dry_run,
        };

        if !resolution.is_change() {
            self.reporter
                .report(ReportEvent::NoVersionChange { version: current });
            return Ok(outcome);
        }

        self.reporter.report(ReportEvent::Resolved {
            category: resolution.category,
            current,
            next: resolution.next,
        });
        self.emit_outputs(&outcome)?;

        if mode.dry_run {
            self.reporter.report(ReportEvent::DryRun {
                version: resolution.next,
            });
            return Ok(outcome);
        }

        let (applied, anchor) = if mode.skip_commit {
            self.reporter
                .report(ReportEvent::CommitSkipped { version: resolution.next });
            (current, pull_request.head_sha.clone())
        } else {
            let commit_sha = self
                .commit_manifest(config, &manifest, &pull_request.head_ref, &resolution.next)
                .await?;
            outcome.commit_sha = Some(commit_sha.clone());
            (resolution.next, commit_sha)
        };

        if mode.create_tag {
            let name = mode.tag_template.render(&applied);
            debug!(tag = %name, target = %anchor, "Creating tag");
            self.platform.create_tag_ref(&name, &anchor).await?;
            self.reporter.report(ReportEvent::TagCreated {
                name: name.clone(),
                target_sha: anchor,
            });
            self.reporter.set_output(OUTPUT_TAG, &name)?;
            outcome.tag = Some(name);
        }

        Ok(outcome)
    }

    fn emit_outputs(&self, outcome: &Reconciliation) -> Result<()> {
        self.reporter
            .set_output(OUTPUT_NEW_VERSION, &outcome.version.to_string())?;
        self.reporter
            .set_output(OUTPUT_PULL_REQUEST_NUMBER, &outcome.pull_request.to_string())?;
        self.reporter
            .set_output(OUTPUT_BUMP_TYPE, outcome.category.as_str())?;
        self.reporter
            .set_output(OUTPUT_PREVIOUS_VERSION, &outcome.previous.to_string())?;
        Ok(())
    }

    async fn commit_manifest(
        &self,
        config: &ReconcileConfig,
        manifest: &ManifestSnapshot,
        branch: &str,
        next: &Version,
    ) -> Result<String> {
        let previous = manifest.version()?;
        let content = ManifestSnapshot::render(&manifest.with_version(next))?;
        let write = ManifestWrite {
            path: manifest.path.clone(),
            content,
            precondition: manifest.precondition.clone(),
            branch: branch.to_string(),
            message: config.run_mode.commit_message.render(&previous, next),
        };

        let commit_sha = self.platform.write_manifest(&write).await?;
        self.reporter.report(ReportEvent::ManifestCommitted {
            path: manifest.path.clone(),
            version: *next,
            commit_sha: commit_sha.clone(),
        });
        Ok(commit_sha)
    }
}

/// Run one reconciliation with the given collaborators
pub async fn reconcile<P, R>(
    config: &ReconcileConfig,
    platform: &P,
    reporter: &R,
) -> Result<Reconciliation>
where
    P: Platform + ?Sized,
    R: Reporter + ?Sized,
{
    ReconciliationOrchestrator::new(platform, reporter)
        .reconcile(config)
        .await
}
