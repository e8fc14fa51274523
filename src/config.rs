use crate::domain::manifest::manifest_path;
use crate::domain::{CommitMessageTemplate, LabelCategoryMapping, TagTemplate};
use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "versionbump.toml";

/// Represents the complete file configuration for pr-version-bump.
///
/// Every field is optional in the file; inputs given on the command line or
/// through the workflow environment take precedence over it.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default labels that trigger major version bumps.
fn default_major_labels() -> Vec<String> {
    vec!["major".to_string(), "breaking".to_string()]
}

/// Returns the default labels that trigger minor version bumps.
fn default_minor_labels() -> Vec<String> {
    vec![
        "minor".to_string(),
        "feature".to_string(),
        "enhancement".to_string(),
    ]
}

/// Returns the default labels that trigger patch version bumps.
fn default_patch_labels() -> Vec<String> {
    vec!["patch".to_string(), "fix".to_string(), "bug".to_string()]
}

/// Label names mapped to each bump category.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_major_labels")]
    pub major: Vec<String>,

    #[serde(default = "default_minor_labels")]
    pub minor: Vec<String>,

    #[serde(default = "default_patch_labels")]
    pub patch: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            major: default_major_labels(),
            minor: default_minor_labels(),
            patch: default_patch_labels(),
        }
    }
}

/// Tag naming and creation.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TagConfig {
    #[serde(default)]
    pub create: bool,

    /// Template containing `{{version}}`; wins over `prefix`
    pub template: Option<String>,

    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CommitConfig {
    #[serde(default)]
    pub skip: bool,

    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ManifestConfig {
    /// Directory holding `package.json`, relative to the repository root
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub dry_run: bool,
}

/// Overrides read from the command line or `INPUT_*` variables.
///
/// `None` means "not given" and defers to the file configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    pub pr_number: Option<u64>,
    pub labels_major: Option<Vec<String>>,
    pub labels_minor: Option<Vec<String>>,
    pub labels_patch: Option<Vec<String>>,
    pub skip_commit: Option<bool>,
    pub create_tag: Option<bool>,
    pub dry_run: Option<bool>,
    pub path: Option<String>,
    pub tag_prefix: Option<String>,
    pub tag_template: Option<String>,
    pub commit_message: Option<String>,
}

/// Run mode flags plus the templates and path the run operates on
#[derive(Debug, Clone, PartialEq)]
pub struct RunMode {
    pub dry_run: bool,
    pub skip_commit: bool,
    pub create_tag: bool,
    pub manifest_path: String,
    pub tag_template: TagTemplate,
    pub commit_message: CommitMessageTemplate,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode {
            dry_run: false,
            skip_commit: false,
            create_tag: false,
            manifest_path: manifest_path(None),
            tag_template: TagTemplate::default(),
            commit_message: CommitMessageTemplate::default(),
        }
    }
}

/// Fully resolved, strongly typed configuration for one reconciliation
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileConfig {
    pub pr_number: Option<u64>,
    pub mapping: LabelCategoryMapping,
    pub run_mode: RunMode,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        ReconcileConfig {
            pr_number: None,
            mapping: LabelCategoryMapping::new(
                default_major_labels(),
                default_minor_labels(),
                default_patch_labels(),
            ),
            run_mode: RunMode::default(),
        }
    }
}

impl ReconcileConfig {
    /// Merge inputs over the file configuration.
    pub fn resolve(config: &Config, inputs: &Inputs) -> Result<Self> {
        let pick = |input: &Option<Vec<String>>, fallback: &Vec<String>| {
            input.clone().unwrap_or_else(|| fallback.clone())
        };
        let mapping = LabelCategoryMapping::new(
            pick(&inputs.labels_major, &config.labels.major),
            pick(&inputs.labels_minor, &config.labels.minor),
            pick(&inputs.labels_patch, &config.labels.patch),
        );

        let template = inputs.tag_template.as_ref().or(config.tag.template.as_ref());
        let prefix = inputs.tag_prefix.as_ref().or(config.tag.prefix.as_ref());
        let tag_template = match (template, prefix) {
            (Some(template), _) => TagTemplate::new(template.clone())?,
            (None, Some(prefix)) => TagTemplate::from_prefix(prefix),
            (None, None) => TagTemplate::default(),
        };

        let commit_message = inputs
            .commit_message
            .as_ref()
            .or(config.commit.message.as_ref())
            .map(|message| CommitMessageTemplate::new(message.clone()))
            .unwrap_or_default();

        let directory = inputs.path.as_deref().or(config.manifest.path.as_deref());

        Ok(ReconcileConfig {
            pr_number: inputs.pr_number,
            mapping,
            run_mode: RunMode {
                dry_run: inputs.dry_run.unwrap_or(config.behavior.dry_run),
                skip_commit: inputs.skip_commit.unwrap_or(config.commit.skip),
                create_tag: inputs.create_tag.unwrap_or(config.tag.create),
                manifest_path: manifest_path(directory),
                tag_template,
                commit_message,
            },
        })
    }
}

/// Parse a loosely typed boolean input.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off` and `y/n` in any case;
/// an empty value is `false`.
pub fn parse_flag(raw: &str) -> std::result::Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" | "" => Ok(false),
        other => Err(format!("'{}' is not a boolean (use true or false)", other)),
    }
}

/// Treat a blank input as not given.
///
/// The workflow runner passes unset `with:` inputs as empty strings.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Parse a pull request number input.
pub fn parse_pr_number_input(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    match raw.parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(BumpError::configuration(format!(
            "Invalid pull request number '{}'",
            raw
        ))),
    }
}

/// Parse a comma-separated label list, dropping blanks.
pub fn parse_label_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionbump.toml` in current directory
/// 3. `.versionbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let (source, config_str) = if let Some(path) = config_path {
        (path.to_string(), fs::read_to_string(path)?)
    } else if Path::new(CONFIG_FILE).exists() {
        (CONFIG_FILE.to_string(), fs::read_to_string(CONFIG_FILE)?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            (
                config_path.display().to_string(),
                fs::read_to_string(&config_path)?,
            )
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| BumpError::configuration(format!("Cannot parse {}: {}", source, e)))
}
