//! Compiled validation matcher

use crate::config::PatternRule;
use crate::error::{Error, Result};
use regex::Regex;
use std::ops::Range;

/// A compiled pattern plus the clauses that must also be found in the input.
///
/// `regex` has no lookaround, so a rule like "5-12 characters containing at
/// least one digit" is held as an anchored length pattern and a `requires`
/// clause. Input matches only when every part matches.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
    requires: Vec<Regex>,
}

impl Matcher {
    /// Compile a single pattern with no extra clauses
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_requirements::<&str>(pattern, &[])
    }

    /// Compile a pattern together with its required clauses
    pub fn with_requirements<S: AsRef<str>>(pattern: &str, requires: &[S]) -> Result<Self> {
        let pattern = compile(pattern)?;
        let requires = requires
            .iter()
            .map(|clause| compile(clause.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { pattern, requires })
    }

    pub(crate) fn from_rule(rule: &PatternRule) -> Result<Self> {
        Self::with_requirements(&rule.pattern, rule.requires.as_slice()).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("Invalid pattern for rule '{}': {}", rule.name, msg))
            }
            other => other,
        })
    }

    /// Whether `input` satisfies the whole policy
    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input) && self.requires.iter().all(|r| r.is_match(input))
    }

    /// Byte spans matched by the primary pattern
    pub fn find_iter<'a>(&'a self, input: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.pattern.find_iter(input).map(|m| m.range())
    }

    /// Remove every run matched by the primary pattern
    pub fn strip(&self, input: &str) -> String {
        self.pattern.replace_all(input, "").into_owned()
    }

    /// Source of the primary pattern
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Sources of the required clauses
    pub fn requirements(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().map(Regex::as_str)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Config(e.to_string()))
}
