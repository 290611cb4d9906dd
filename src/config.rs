//! Configuration loading and parsing for `notesaurus.toml` files.
//!
//! Missing or unrecognized keys fall back to the documented defaults, so a
//! partial configuration is always valid.
use serde::Deserialize;
use std::path::Path;

use crate::{
    error::Result,
    notes::{classify::SectionRule, format::RenderConfig},
};

/// Default configuration filename, looked up locally or in the remote
/// repository root.
pub const DEFAULT_CONFIG_FILE: &str = "notesaurus.toml";

/// Default document title template.
pub const DEFAULT_TITLE_TEMPLATE: &str = "{repo_name} {version}";

/// Default intro template.
pub const DEFAULT_INTRO_TEMPLATE: &str =
    "We're happy to announce the release of {repo_name} {version}!";

/// Default outro template.
pub const DEFAULT_OUTRO_TEMPLATE: &str = "_These lists are automatically \
generated, and may not be complete or may contain\nduplicates._\n";

/// Default pattern matching fenced release-note blocks in a pull request
/// description.
pub const DEFAULT_SUMMARY_PATTERN: &str =
    r"^```release-note\s*(?P<summary>[\s\S]*?\w[\s\S]*?)\s*^```";

/// Default pattern matching an inline `{label="..."}` attribute inside a
/// release-note block.
pub const DEFAULT_LABEL_ATTRIBUTE_PATTERN: &str =
    r#"\{[^}]*label="(?P<label>[^"]+)"[^}]*\}"#;

/// Root configuration structure for `notesaurus.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template for the level-1 document title.
    pub title_template: String,
    /// Template for the block following the title.
    pub intro_template: String,
    /// Template for the block closing the document.
    pub outro_template: String,
    /// Logins excluded from the contributor lists (e.g. bots).
    pub ignored_user_logins: Vec<String>,
    /// Pattern detecting release-note blocks in pull request descriptions.
    pub pr_summary_pattern: String,
    /// Pattern detecting the inline label attribute within a block.
    pub label_attribute_pattern: String,
    /// Ordered label-pattern-to-section rules; table order is also the
    /// section display order.
    #[serde(rename = "section")]
    pub sections: Vec<SectionRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title_template: DEFAULT_TITLE_TEMPLATE.into(),
            intro_template: DEFAULT_INTRO_TEMPLATE.into(),
            outro_template: DEFAULT_OUTRO_TEMPLATE.into(),
            ignored_user_logins: vec!["web-flow".to_string()],
            pr_summary_pattern: DEFAULT_SUMMARY_PATTERN.into(),
            label_attribute_pattern: DEFAULT_LABEL_ATTRIBUTE_PATTERN.into(),
            sections: default_sections(),
        }
    }
}

fn default_sections() -> Vec<SectionRule> {
    [
        (".*Highlight.*", "Highlights"),
        (".*New feature.*", "New Features"),
        (".*Enhancement.*", "Enhancements"),
        (".*Performance.*", "Performance"),
        (".*Bug fix.*", "Bug Fixes"),
        (".*API.*", "API Changes"),
        (".*Maintenance.*", "Maintenance"),
        (".*Documentation.*", "Documentation"),
        (".*Infrastructure.*", "Infrastructure"),
    ]
    .into_iter()
    .map(|(pattern, title)| SectionRule {
        pattern: pattern.to_string(),
        title: title.to_string(),
    })
    .collect()
}

impl Config {
    /// Parse configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a local TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Render-level settings derived from this configuration.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            title_template: self.title_template.clone(),
            intro_template: self.intro_template.clone(),
            outro_template: self.outro_template.clone(),
            ignored_user_logins: self
                .ignored_user_logins
                .iter()
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_defaults() {
        let config = Config::default();

        assert_eq!(config.title_template, "{repo_name} {version}");
        assert_eq!(config.ignored_user_logins, vec!["web-flow"]);
        assert_eq!(config.sections.len(), 9);
        assert_eq!(config.sections[0].title, "Highlights");
        assert_eq!(config.sections[8].title, "Infrastructure");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
title_template = "Release {version} of {repo_name}"
ignored_user_logins = ["dependabot[bot]"]
"#,
        )
        .unwrap();

        assert_eq!(config.title_template, "Release {version} of {repo_name}");
        assert_eq!(config.ignored_user_logins, vec!["dependabot[bot]"]);
        // everything else falls back to defaults
        assert_eq!(config.intro_template, DEFAULT_INTRO_TEMPLATE);
        assert_eq!(config.pr_summary_pattern, DEFAULT_SUMMARY_PATTERN);
        assert_eq!(config.sections.len(), 9);
    }

    #[test]
    fn section_order_follows_the_file() {
        let config = Config::from_toml(
            r#"
[[section]]
pattern = ".*Breaking.*"
title = "Breaking Changes"

[[section]]
pattern = ".*Bug fix.*"
title = "Bug Fixes"
"#,
        )
        .unwrap();

        let titles: Vec<&str> =
            config.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Breaking Changes", "Bug Fixes"]);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let config = Config::from_toml(
            r#"
unknown_key = true
outro_template = "Bye."
"#,
        )
        .unwrap();

        assert_eq!(config.outro_template, "Bye.");
        assert_eq!(config.title_template, DEFAULT_TITLE_TEMPLATE);
    }

    #[test]
    fn loads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"title_template = "{{repo_name}} rocks""#).unwrap();

        let config = Config::load_file(file.path()).unwrap();
        assert_eq!(config.title_template, "{repo_name} rocks");
    }
}
