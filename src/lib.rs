pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod orchestration;
pub mod platform;
pub mod report;
pub mod ui;

pub use error::{BumpError, Result};
pub use orchestration::{reconcile, ReconcileState, Reconciliation, ReconciliationOrchestrator};
