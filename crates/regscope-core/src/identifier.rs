//! # Identifier Newtypes
//!
//! Validated identifier newtypes for the Regscope stack. Rule identifiers
//! key the rationale map and the matched-rule audit trail, so they are a
//! distinct type rather than a bare string.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A rule identifier, stable across evaluations.
///
/// Rule ids key the rationale map in evaluation output and appear in the
/// ordered matched-rule list used for audit. They must be non-empty and
/// contain no whitespace.
///
/// Deserialization is transparent (a plain JSON string); well-formedness is
/// enforced by the rule-table loader so a malformed table is rejected as a
/// whole with an error naming the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a rule id from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRuleId`] if the string is empty or
    /// contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if let Err(reason) = Self::check(&s) {
            return Err(ValidationError::InvalidRuleId {
                id: s,
                reason: reason.to_string(),
            });
        }
        Ok(Self(s))
    }

    /// Whether a raw string satisfies the rule-id format.
    ///
    /// Used by the table loader to validate ids that arrived through
    /// transparent deserialization.
    pub fn is_well_formed(&self) -> bool {
        Self::check(&self.0).is_ok()
    }

    fn check(s: &str) -> Result<(), &'static str> {
        if s.is_empty() {
            return Err("must not be empty");
        }
        if s.chars().any(char::is_whitespace) {
            return Err("must not contain whitespace");
        }
        Ok(())
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
