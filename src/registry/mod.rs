//! Named pattern registry
//!
//! An immutable mapping from short field names (`identifier`, `email`, ...)
//! to compiled matchers. Built once from a rule table; there is no way to add,
//! replace or remove entries afterwards, so a registry can be shared freely
//! across threads.
//!
//! Asking for a name that is not registered is an [`Error::NotFound`], never
//! a silent `false`: an unknown field and an invalid value are different bugs.

mod global;
mod matcher;

pub use global::{get, global, install, test};
pub use matcher::Matcher;

use crate::config::{
    default_pattern_rules, email_pattern, EmailAnchoring, PatternRule, RegistryConfig, EMAIL,
};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// A registered pattern
#[derive(Debug, Clone)]
pub struct NamedPattern {
    name: String,
    description: String,
    matcher: Matcher,
}

impl NamedPattern {
    /// Registry key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Compiled matcher
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// Read-only registry of named validation patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: HashMap<String, NamedPattern>,
}

impl PatternRegistry {
    /// Compile a registry from the given rules.
    ///
    /// Fails with [`Error::Config`] if a name is empty or repeated, or if any
    /// pattern does not compile.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        let mut patterns = HashMap::with_capacity(rules.len());

        for rule in rules {
            if rule.name.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Pattern rule with empty name: '{}'",
                    rule.pattern
                )));
            }
            if patterns.contains_key(&rule.name) {
                return Err(Error::Config(format!(
                    "Duplicate pattern rule '{}'",
                    rule.name
                )));
            }

            let matcher = Matcher::from_rule(&rule)?;
            patterns.insert(
                rule.name.clone(),
                NamedPattern {
                    name: rule.name,
                    description: rule.description,
                    matcher,
                },
            );
        }

        tracing::debug!("Compiled pattern registry with {} patterns", patterns.len());
        Ok(Self { patterns })
    }

    /// The built-in form rules with the given email anchoring
    pub fn builtin(anchoring: EmailAnchoring) -> Result<Self> {
        Self::new(with_email_anchoring(default_pattern_rules(), anchoring))
    }

    /// Build from configuration
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(with_email_anchoring(
            config.rules.clone(),
            config.email_anchoring,
        ))
    }

    /// Compiled matcher registered under `name`
    pub fn get(&self, name: &str) -> Result<&Matcher> {
        self.pattern(name).map(NamedPattern::matcher)
    }

    /// Registered entry under `name`
    pub fn pattern(&self, name: &str) -> Result<&NamedPattern> {
        self.patterns
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Whether `input` satisfies the pattern registered under `name`
    pub fn test(&self, name: &str, input: &str) -> Result<bool> {
        Ok(self.get(name)?.is_match(input))
    }

    /// Remove every run of `input` matched by the pattern under `name`
    pub fn strip(&self, name: &str, input: &str) -> Result<String> {
        Ok(self.get(name)?.strip(input))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entries sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &NamedPattern> {
        let mut entries: Vec<&NamedPattern> = self.patterns.values().collect();
        entries.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        entries.into_iter()
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are registered
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// Only the built-in email rule follows the anchoring switch; a user-supplied
// `email` rule with a different pattern is left as written.
fn with_email_anchoring(mut rules: Vec<PatternRule>, anchoring: EmailAnchoring) -> Vec<PatternRule> {
    let builtin = [
        email_pattern(EmailAnchoring::Full),
        email_pattern(EmailAnchoring::Prefix),
    ];
    for rule in rules.iter_mut() {
        if rule.name == EMAIL && builtin.contains(&rule.pattern) {
            rule.pattern = email_pattern(anchoring);
        }
    }
    rules
}
