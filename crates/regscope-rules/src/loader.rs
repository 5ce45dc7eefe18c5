//! # Rule Table Loader
//!
//! Loads rule tables from JSON or YAML files, preserving declaration order
//! and failing fast on structural problems. A malformed table is rejected
//! as a whole — rules are never silently dropped or reordered.
//!
//! Condition-name validation against a [`PredicateRegistry`]
//! (`RuleTable::validate_conditions`) happens at engine construction, since
//! it depends on which registry the table will be paired with.
//!
//! [`PredicateRegistry`]: crate::predicate::PredicateRegistry

use std::path::Path;

use crate::error::{RulesError, RulesResult};
use crate::rule::RuleTable;

/// The rule table bundled with this crate.
const BUILTIN_RULES: &str = include_str!("../data/regulator_rules.json");

/// Parse a rule table from a JSON string and validate its structure.
pub fn from_json_str(json: &str) -> RulesResult<RuleTable> {
    let table: RuleTable = serde_json::from_str(json)?;
    table.validate_structure()?;
    Ok(table)
}

/// Parse a rule table from a YAML string and validate its structure.
pub fn from_yaml_str(yaml: &str) -> RulesResult<RuleTable> {
    let table: RuleTable = serde_yaml::from_str(yaml)?;
    table.validate_structure()?;
    Ok(table)
}

/// Load a rule table from a file, dispatching on extension
/// (`.json`, `.yaml`, `.yml`).
pub fn from_path(path: &Path) -> RulesResult<RuleTable> {
    if !path.exists() {
        return Err(RulesError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let table: RuleTable = match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents).map_err(|source| {
            RulesError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents).map_err(|source| {
            RulesError::YamlParse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        _ => {
            return Err(RulesError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    table.validate_structure()?;
    tracing::info!(
        path = %path.display(),
        rules = table.len(),
        "rule table loaded"
    );
    Ok(table)
}

/// The rule table shipped with this crate.
///
/// Covers the GDPR/UK GDPR/NIS2/ISO 27001/SOC 2/PCI DSS/HIPAA baseline plus
/// the trigger-less default rule, together with the questionnaire lookup
/// lists.
pub fn builtin_table() -> RulesResult<RuleTable> {
    from_json_str(BUILTIN_RULES)
}
