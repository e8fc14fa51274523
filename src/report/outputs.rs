//! Workflow output and step summary files.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Append-only writer for a workflow command file such as `GITHUB_OUTPUT`
#[derive(Debug, Clone)]
pub struct CommandFile {
    path: PathBuf,
}

impl CommandFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CommandFile { path: path.into() }
    }

    /// File named by an environment variable, if set and non-empty
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var_os(var)
            .filter(|value| !value.is_empty())
            .map(CommandFile::new)
    }

    /// Append a `name=value` output; multi-line values use the heredoc form.
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let line = if value.contains('\n') {
            let delimiter = format!("ghadelimiter_{}", std::process::id());
            format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
        } else {
            format!("{}={}\n", name, value)
        };
        self.append(&line)
    }

    pub fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}
