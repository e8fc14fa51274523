use crate::domain::Version;
use crate::error::{BumpError, Result};
use serde_json::Value;

/// Manifest file name looked up inside the configured directory
pub const MANIFEST_FILE: &str = "package.json";

/// Key holding the version inside the manifest document
const VERSION_KEY: &str = "version";

/// Parsed manifest document with the precondition token it was read at.
///
/// The token (the blob SHA reported by the platform) must accompany any write
/// of an updated document so stale writes are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSnapshot {
    pub path: String,
    pub document: Value,
    pub precondition: String,
}

impl ManifestSnapshot {
    /// Parse raw manifest content
    pub fn parse(
        path: impl Into<String>,
        content: &str,
        precondition: impl Into<String>,
    ) -> Result<Self> {
        let path = path.into();
        let document: Value = serde_json::from_str(content)
            .map_err(|e| BumpError::manifest(format!("Cannot parse '{}': {}", path, e)))?;

        if !document.is_object() {
            return Err(BumpError::manifest(format!(
                "'{}' must contain a JSON object",
                path
            )));
        }

        Ok(ManifestSnapshot {
            path,
            document,
            precondition: precondition.into(),
        })
    }

    /// Current version recorded in the manifest
    pub fn version(&self) -> Result<Version> {
        let raw = self
            .document
            .get(VERSION_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                BumpError::manifest(format!("'{}' has no string \"version\" field", self.path))
            })?;
        Version::parse(raw)
    }

    /// Same document with the version field replaced; key order is kept.
    pub fn with_version(&self, version: &Version) -> Value {
        let mut document = self.document.clone();
        if let Some(object) = document.as_object_mut() {
            object.insert(VERSION_KEY.to_string(), Value::String(version.to_string()));
        }
        document
    }

    /// Serialize an updated document the way npm writes it: two-space indent,
    /// trailing newline.
    pub fn render(document: &Value) -> Result<String> {
        let mut content = serde_json::to_string_pretty(document)
            .map_err(|e| BumpError::manifest(format!("Cannot serialize manifest: {}", e)))?;
        content.push('\n');
        Ok(content)
    }
}

/// Manifest path for an optional directory override.
///
/// `None`, `""` and `"."` all refer to the repository root.
pub fn manifest_path(directory: Option<&str>) -> String {
    match directory.map(|d| d.trim().trim_matches('/')) {
        None | Some("") | Some(".") => MANIFEST_FILE.to_string(),
        Some(dir) => format!("{}/{}", dir.trim_start_matches("./"), MANIFEST_FILE),
    }
}
