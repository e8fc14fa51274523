// tests/config_test.rs
use pr_version_bump::config::{
    load_config, non_blank, parse_label_list, Config, Inputs, ReconcileConfig,
};
use pr_version_bump::domain::{CommitMessageTemplate, Version};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(
        config.labels.major,
        vec!["major".to_string(), "breaking".to_string()]
    );
    assert!(config.labels.patch.contains(&"fix".to_string()));
    assert!(!config.tag.create);
    assert!(!config.behavior.dry_run);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[labels]
patch = ["bugfix"]

[commit]
skip = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.labels.patch, vec!["bugfix".to_string()]);
    // unspecified lists keep their defaults
    assert!(config.labels.major.contains(&"breaking".to_string()));
    assert!(config.commit.skip);
}

#[test]
fn test_load_fixture_and_resolve() {
    let config =
        load_config(Some("tests/fixtures/versionbump.toml")).expect("Failed to load test config");
    let resolved = ReconcileConfig::resolve(&config, &Inputs::default()).unwrap();

    assert_eq!(resolved.mapping.major, vec!["semver:major".to_string()]);
    assert!(resolved.run_mode.create_tag);
    assert!(resolved.run_mode.dry_run);
    assert_eq!(resolved.run_mode.manifest_path, "packages/web/package.json");
    assert_eq!(
        resolved.run_mode.tag_template.render(&Version::new(1, 4, 0)),
        "release-1.4.0"
    );
    assert_eq!(
        resolved.run_mode.commit_message,
        CommitMessageTemplate::new("release: {{previous-version}} -> {{new-version}}")
    );
}

#[test]
fn test_invalid_toml_is_configuration_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[labels\nmajor = 1").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    assert!(load_config(Some("tests/fixtures/does-not-exist.toml")).is_err());
}

#[test]
fn test_blank_label_input_keeps_file_mapping() {
    let config = load_config(Some("tests/fixtures/versionbump.toml")).unwrap();
    let inputs = Inputs {
        labels_major: non_blank(Some("")).map(parse_label_list),
        tag_template: non_blank(Some(" ")).map(str::to_string),
        ..Inputs::default()
    };

    let resolved = ReconcileConfig::resolve(&config, &inputs).unwrap();
    assert_eq!(resolved.mapping.major, vec!["semver:major".to_string()]);
    assert_eq!(
        resolved.run_mode.tag_template.render(&Version::new(1, 4, 0)),
        "release-1.4.0"
    );
}
