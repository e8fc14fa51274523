use crate::domain::template;
use crate::domain::Version;
use crate::error::{BumpError, Result};

/// Default tag naming template
pub const DEFAULT_TAG_TEMPLATE: &str = "v{{version}}";

/// Tag naming template (e.g., "v{{version}}", "release-{{version}}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    pattern: String,
}

impl TagTemplate {
    /// Create a tag template, requiring a `{{version}}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !template::has_placeholder(&pattern, "version") {
            return Err(BumpError::configuration(format!(
                "Tag template '{}' must contain a {{{{version}}}} placeholder",
                pattern
            )));
        }
        Ok(TagTemplate { pattern })
    }

    /// Template made of a fixed prefix followed by the version
    pub fn from_prefix(prefix: &str) -> Self {
        TagTemplate {
            pattern: format!("{}{{{{version}}}}", prefix),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to the template.
    /// Example: template="v{{version}}", version=1.2.3 -> "v1.2.3"
    pub fn render(&self, version: &Version) -> String {
        template::render(&self.pattern, &[("version", &version.to_string())])
    }
}

impl Default for TagTemplate {
    fn default() -> Self {
        TagTemplate {
            pattern: DEFAULT_TAG_TEMPLATE.to_string(),
        }
    }
}
