//! Rule-table error types.
//!
//! Structured errors for table loading and validation. All errors carry
//! context (file paths, rule ids, condition names) so a rejected table can
//! be fixed without spelunking.
//!
//! ## Fail-Loud Invariant
//!
//! A rule referencing an unknown composite-condition name is a load-time
//! error, never a silent no-op: silently skipping a condition would
//! under-apply regulations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a rule table.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A rule id is empty or contains whitespace.
    #[error("rule at index {index} has invalid id {id:?} (must be non-empty, no whitespace)")]
    InvalidRuleId {
        /// Zero-based position of the rule in the table.
        index: usize,
        /// The rejected id string.
        id: String,
    },

    /// Two rules share the same id.
    #[error("duplicate rule id {rule_id:?}")]
    DuplicateRuleId { rule_id: String },

    /// A rule references a composite-condition name not present in the
    /// predicate registry.
    #[error("rule {rule_id:?} references unknown condition {condition:?} (known: {known})")]
    UnknownCondition {
        /// Id of the offending rule.
        rule_id: String,
        /// The unrecognized condition name.
        condition: String,
        /// Comma-separated registry names, for the error message.
        known: String,
    },

    /// A required file was not found.
    #[error("rule table file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// JSON parsing failed for a file.
    #[error("failed to parse JSON rule table at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML parsing failed for a file.
    #[error("failed to parse YAML rule table at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// File extension is neither JSON nor YAML.
    #[error("unsupported rule table format: {path} (expected .json, .yaml, or .yml)")]
    UnsupportedFormat { path: PathBuf },

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rule-table operations.
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rule_id_display() {
        let err = RulesError::InvalidRuleId {
            index: 3,
            id: "bad id".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("index 3"));
        assert!(msg.contains("bad id"));
    }

    #[test]
    fn duplicate_rule_id_display() {
        let err = RulesError::DuplicateRuleId {
            rule_id: "eu_gdpr".to_string(),
        };
        assert!(format!("{err}").contains("eu_gdpr"));
    }

    #[test]
    fn unknown_condition_display_names_rule_and_condition() {
        let err = RulesError::UnknownCondition {
            rule_id: "uk_fca".to_string(),
            condition: "fca_licensed".to_string(),
            known: "any_eu_data_processing, fca_regulated".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("uk_fca"));
        assert!(msg.contains("fca_licensed"));
        assert!(msg.contains("fca_regulated"));
    }

    #[test]
    fn file_not_found_display() {
        let err = RulesError::FileNotFound {
            path: PathBuf::from("/tmp/missing.json"),
        };
        assert!(format!("{err}").contains("/tmp/missing.json"));
    }

    #[test]
    fn unsupported_format_display() {
        let err = RulesError::UnsupportedFormat {
            path: PathBuf::from("rules.toml"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("rules.toml"));
        assert!(msg.contains(".json"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RulesError::from(io_err);
        assert!(format!("{err}").contains("access denied"));
    }
}
