//! Form field validation against registry patterns

use crate::config::BLANK;
use crate::error::Result;
use crate::registry::PatternRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    /// Form field name
    pub field: String,
    /// Pattern the field was checked against
    pub pattern: String,
    /// Whether the value satisfied the pattern
    pub valid: bool,
    /// Why the field failed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No value was supplied for the field
    Missing,
    /// The value did not match the pattern
    Mismatch,
}

/// Result of validating a set of fields, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub fields: Vec<FieldOutcome>,
}

impl ValidationReport {
    /// Whether every field passed
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.valid)
    }

    /// Fields that failed
    pub fn failures(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.fields.iter().filter(|f| !f.valid)
    }

    /// Outcome for `field`, if it was checked
    pub fn outcome(&self, field: &str) -> Option<&FieldOutcome> {
        self.fields.iter().find(|f| f.field == field)
    }
}

/// Checks named form fields against registry patterns
pub struct FieldValidator<'a> {
    registry: &'a PatternRegistry,
    fields: Vec<(String, String)>,
    strip_blank: bool,
}

impl<'a> FieldValidator<'a> {
    /// Create a validator with no fields over `registry`
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self {
            registry,
            fields: Vec::new(),
            strip_blank: false,
        }
    }

    /// Check `field` against the pattern registered as `pattern`
    pub fn field(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.fields.push((field.into(), pattern.into()));
        self
    }

    /// Remove whitespace with the `blank` pattern before testing
    pub fn strip_blank(mut self, strip: bool) -> Self {
        self.strip_blank = strip;
        self
    }

    /// Validate `values` (field name to raw input).
    ///
    /// Fails with `NotFound` if a field refers to an unregistered pattern, or
    /// if blank stripping is on and no `blank` pattern is registered.
    pub fn validate(&self, values: &HashMap<String, String>) -> Result<ValidationReport> {
        let blank = if self.strip_blank {
            Some(self.registry.get(BLANK)?)
        } else {
            None
        };

        let mut fields = Vec::with_capacity(self.fields.len());
        for (field, pattern) in &self.fields {
            let matcher = self.registry.get(pattern)?;

            let reason = match values.get(field) {
                None => Some(FailureReason::Missing),
                Some(raw) => {
                    let matched = match blank {
                        Some(blank) => matcher.is_match(&blank.strip(raw)),
                        None => matcher.is_match(raw),
                    };
                    (!matched).then_some(FailureReason::Mismatch)
                }
            };

            fields.push(FieldOutcome {
                field: field.clone(),
                pattern: pattern.clone(),
                valid: reason.is_none(),
                reason,
            });
        }

        Ok(ValidationReport { fields })
    }
}
