//! `{{name}}` placeholder substitution shared by tag and commit templates.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_-]*)\s*\}\}").expect("placeholder regex is valid")
    })
}

/// Whether `template` contains a `{{name}}` placeholder (inner whitespace allowed)
pub fn has_placeholder(template: &str, name: &str) -> bool {
    placeholder_regex()
        .captures_iter(template)
        .any(|caps| &caps[1] == name)
}

/// Substitute every known placeholder; unknown ones are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            vars.iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_all_occurrences() {
        let out = render("{{version}}-{{ version }}", &[("version", "1.0.0")]);
        assert_eq!(out, "1.0.0-1.0.0");
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let out = render("v{{version}} {{other}}", &[("version", "2.0.0")]);
        assert_eq!(out, "v2.0.0 {{other}}");
    }

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("v{{version}}", "version"));
        assert!(has_placeholder("release/{{ version }}", "version"));
        assert!(!has_placeholder("v{version}", "version"));
        assert!(!has_placeholder("{{new-version}}", "version"));
    }
}
