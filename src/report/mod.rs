//! Reporting capability handed to the orchestrator.
//!
//! - `event` - Informational events and their messages
//! - `outputs` - Workflow output / step summary files
//! - [ActionsReporter] - Production sink: `tracing` plus `GITHUB_OUTPUT`
//! - [RecordingReporter] - Captures everything for assertions

pub mod event;
pub mod outputs;

pub use event::ReportEvent;
pub use outputs::CommandFile;

use crate::error::Result;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// Sink for reconciliation events and computed outputs
pub trait Reporter: Send + Sync {
    fn report(&self, event: ReportEvent);

    /// Publish a named output (e.g. `new-version`)
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
}

/// Reporter for workflow runs.
///
/// Events go to `tracing`; outputs go to the `GITHUB_OUTPUT` file, or to stdout
/// as `name=value` when running outside a workflow.
pub struct ActionsReporter {
    outputs: Option<CommandFile>,
}

impl ActionsReporter {
    pub fn new(outputs: Option<CommandFile>) -> Self {
        ActionsReporter { outputs }
    }

    pub fn from_env() -> Self {
        ActionsReporter::new(CommandFile::from_env("GITHUB_OUTPUT"))
    }
}

impl Reporter for ActionsReporter {
    fn report(&self, event: ReportEvent) {
        match &event {
            ReportEvent::MultipleCategoriesMatched { .. } => warn!("{}", event),
            _ => info!("{}", event),
        }
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        info!(output = name, value, "Setting output");
        match &self.outputs {
            Some(file) => file.set_output(name, value),
            None => {
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }
}

/// Reporter that keeps every event and output in memory
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
    outputs: Mutex<Vec<(String, String)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        lock(&self.events).clone()
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        lock(&self.outputs).clone()
    }

    /// Last value set for an output
    pub fn output(&self, name: &str) -> Option<String> {
        lock(&self.outputs)
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: ReportEvent) {
        lock(&self.events).push(event);
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        lock(&self.outputs).push((name.to_string(), value.to_string()));
        Ok(())
    }
}
