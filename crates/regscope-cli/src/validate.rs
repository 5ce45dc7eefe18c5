//! # Validate Subcommand
//!
//! Fail-fast rule table validation: structural checks (id format,
//! uniqueness) plus composite-condition names resolved against the builtin
//! predicate registry.
//!
//! ## Fail-Loud Invariant
//!
//! A table referencing an unknown condition name must be rejected here,
//! before it is ever shipped to the service — an unrecognized condition at
//! evaluation time would silently under-apply regulations.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regscope_rules::{PredicateRegistry, RulesEngine};

/// Arguments for the `regscope validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rule table file to validate (.json, .yaml, or .yml). Validates the
    /// bundled table when omitted.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on
/// operational error.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let table = match crate::load_table(args.path.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("FAIL: {e:#}");
            return Ok(1);
        }
    };

    let rules = table.len();
    match RulesEngine::new(table, PredicateRegistry::builtin()) {
        Ok(engine) => {
            let options = engine.options();
            println!(
                "OK: {rules} rules, {} sectors, {} data types, {} jurisdictions",
                options.sectors.len(),
                options.data_types.len(),
                options.jurisdictions.len()
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("FAIL: {e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn builtin_table_validates() {
        let args = ValidateArgs { path: None };
        assert_eq!(run_validate(&args).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_a_validation_failure() {
        let args = ValidateArgs {
            path: Some(Path::new("/missing/rules.json").to_path_buf()),
        };
        assert_eq!(run_validate(&args).unwrap(), 1);
    }

    #[test]
    fn unknown_condition_is_a_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{
                "rules": [
                    {
                        "id": "bad",
                        "name": "Bad",
                        "triggers": {"conditions": {"unknown_condition": true}},
                        "results": {},
                        "rationale": "r"
                    }
                ]
            }"#,
        )
        .unwrap();

        let args = ValidateArgs { path: Some(path) };
        assert_eq!(run_validate(&args).unwrap(), 1);
    }
}
