//! # Evaluate Subcommand
//!
//! Evaluates an organization profile (a JSON file in questionnaire shape)
//! against a rule table and prints the outcome as JSON.
//!
//! Unlike the HTTP surface, this path accepts partial profiles — a profile
//! with empty list fields evaluates normally and simply matches fewer
//! rules, which is useful while a questionnaire is still being filled in.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use regscope_core::OrganizationProfile;
use regscope_rules::{PredicateRegistry, RulesEngine};

/// Arguments for the `regscope evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Organization profile JSON file.
    #[arg(long, value_name = "PATH")]
    pub profile: PathBuf,

    /// Rule table file (.json, .yaml, or .yml). Uses the bundled table
    /// when omitted.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the evaluate subcommand.
///
/// Returns exit code: 0 on success (including zero matches — an empty
/// result is a valid outcome), 1 on invalid input, 2 on operational error.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let profile_json = std::fs::read_to_string(&args.profile)
        .with_context(|| format!("failed to read profile {}", args.profile.display()))?;
    let profile: OrganizationProfile = match serde_json::from_str(&profile_json) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("FAIL: invalid profile {}: {e}", args.profile.display());
            return Ok(1);
        }
    };

    let table = match crate::load_table(args.rules.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("FAIL: {e:#}");
            return Ok(1);
        }
    };

    let engine = match RulesEngine::new(table, PredicateRegistry::builtin()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("FAIL: {e}");
            return Ok(1);
        }
    };

    let result = engine.evaluate(&profile);
    tracing::info!(
        matched = result.matched_rule_ids.len(),
        "profile evaluated"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");

    Ok(0)
}
