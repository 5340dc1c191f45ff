//! FieldGuard configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main FieldGuard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldGuardConfig {
    /// Pattern registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl FieldGuardConfig {
    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.json`, `.yaml`/`.yml`, anything
    /// else is read as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render configuration: {}", e)))
    }
}

/// Pattern registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// How the built-in `email` rule is anchored
    #[serde(default)]
    pub email_anchoring: EmailAnchoring,

    /// Pattern rules compiled into the registry
    #[serde(default = "default_pattern_rules")]
    pub rules: Vec<PatternRule>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            email_anchoring: EmailAnchoring::default(),
            rules: default_pattern_rules(),
        }
    }
}

/// End anchoring of the `email` pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailAnchoring {
    /// Anchored at both ends; trailing characters are rejected
    #[default]
    Full,
    /// Anchored at the start only; any suffix after a valid address is accepted
    Prefix,
}

/// A single named pattern rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Registry key
    pub name: String,

    /// Primary regular expression
    pub pattern: String,

    /// Patterns that must each match somewhere in the input as well
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,

    /// Human readable description
    #[serde(default)]
    pub description: String,
}

impl PatternRule {
    /// Create a rule with no extra requirements
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            requires: Vec::new(),
            description: description.into(),
        }
    }

    /// Add a pattern that must also be found somewhere in the input
    pub fn requiring(mut self, pattern: impl Into<String>) -> Self {
        self.requires.push(pattern.into());
        self
    }
}

pub const BLANK: &str = "blank";
pub const IDENTIFIER: &str = "identifier";
pub const PASSWORD: &str = "password";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";

// `.` in the form patterns never crosses a line terminator.
const LINE_CHAR: &str = r"[^\n\r\u{2028}\u{2029}]";

// Whitespace as form input sees it: includes U+FEFF, excludes U+0085.
const WHITESPACE: &str =
    r"[\t\n\x0B\x0C\r \u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]";

const EMAIL_PREFIX: &str = r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9\-]+\.[A-Za-z0-9\-]+";

/// Email pattern for the given anchoring
pub fn email_pattern(anchoring: EmailAnchoring) -> String {
    match anchoring {
        EmailAnchoring::Full => format!("{}$", EMAIL_PREFIX),
        EmailAnchoring::Prefix => EMAIL_PREFIX.to_string(),
    }
}

/// The built-in form validation rules
pub fn default_pattern_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            BLANK,
            format!("{}*", WHITESPACE),
            "Runs of zero or more whitespace characters",
        ),
        PatternRule::new(
            IDENTIFIER,
            format!("^{}{{5,12}}$", LINE_CHAR),
            "User ID: 5-12 characters with at least one letter or digit",
        )
        .requiring("[a-zA-Z0-9]"),
        PatternRule::new(
            PASSWORD,
            format!("^{}{{8,15}}$", LINE_CHAR),
            "Password: 8-15 characters with at least one letter, digit or symbol",
        )
        .requiring(r"[a-zA-Z0-9`~!@#$%^&*()\-_+=\\]"),
        PatternRule::new(
            PHONE,
            r"^(01[016789])[0-9]{3,4}[0-9]{4}$",
            "Korean mobile number: 010/011/016/017/018/019 followed by 7-8 digits",
        ),
        PatternRule::new(
            EMAIL,
            email_pattern(EmailAnchoring::default()),
            "Email address: local@domain.tld",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FieldGuardConfig::default();
        assert_eq!(config.registry.email_anchoring, EmailAnchoring::Full);
        assert_eq!(config.registry.rules.len(), 5);
    }

    #[test]
    fn test_default_rules_have_unique_names() {
        let rules = default_pattern_rules();
        let mut names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names, vec![BLANK, EMAIL, IDENTIFIER, PASSWORD, PHONE]);
    }

    #[test]
    fn test_lookahead_rules_carry_requirements() {
        let rules = default_pattern_rules();
        let identifier = rules.iter().find(|r| r.name == IDENTIFIER).unwrap();
        assert_eq!(identifier.requires, vec!["[a-zA-Z0-9]".to_string()]);
        let phone = rules.iter().find(|r| r.name == PHONE).unwrap();
        assert!(phone.requires.is_empty());
    }

    #[test]
    fn test_email_pattern_anchoring() {
        assert!(email_pattern(EmailAnchoring::Full).ends_with('$'));
        assert!(!email_pattern(EmailAnchoring::Prefix).ends_with('$'));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = FieldGuardConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: FieldGuardConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.registry.rules, config.registry.rules);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: FieldGuardConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.registry.rules.len(), 5);

        let parsed: FieldGuardConfig =
            toml::from_str("[registry]\nemail_anchoring = \"prefix\"\n").unwrap();
        assert_eq!(parsed.registry.email_anchoring, EmailAnchoring::Prefix);
        assert_eq!(parsed.registry.rules.len(), 5);
    }

    #[test]
    fn test_load_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            json,
            r#"{{"registry": {{"email_anchoring": "prefix", "rules": [{{"name": "zip", "pattern": "^[0-9]{{5}}$"}}]}}}}"#
        )
        .unwrap();
        let config = FieldGuardConfig::load(json.path()).unwrap();
        assert_eq!(config.registry.email_anchoring, EmailAnchoring::Prefix);
        assert_eq!(config.registry.rules.len(), 1);
        assert_eq!(config.registry.rules[0].name, "zip");

        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            yaml,
            "registry:\n  rules:\n    - name: zip\n      pattern: \"^[0-9]{{5}}$\"\n      description: Postal code\n"
        )
        .unwrap();
        let config = FieldGuardConfig::load(yaml.path()).unwrap();
        assert_eq!(config.registry.rules[0].description, "Postal code");

        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(toml_file, "[registry]\nemail_anchoring = \"full\"\n").unwrap();
        let config = FieldGuardConfig::load(toml_file.path()).unwrap();
        assert_eq!(config.registry.email_anchoring, EmailAnchoring::Full);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FieldGuardConfig::load("/nonexistent/fieldguard.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
