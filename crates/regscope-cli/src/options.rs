//! # Options Subcommand
//!
//! Prints the questionnaire option lists (sectors, data types,
//! jurisdictions) carried by a rule table, as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for the `regscope options` subcommand.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Rule table file (.json, .yaml, or .yml). Uses the bundled table
    /// when omitted.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the options subcommand.
///
/// Returns exit code: 0 on success, 1 on invalid table, 2 on operational
/// error.
pub fn run_options(args: &OptionsArgs) -> Result<u8> {
    let table = match crate::load_table(args.rules.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("FAIL: {e:#}");
            return Ok(1);
        }
    };

    let options = table.options();
    let output = if args.pretty {
        serde_json::to_string_pretty(&options)?
    } else {
        serde_json::to_string(&options)?
    };
    println!("{output}");

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_builtin_options() {
        let args = OptionsArgs {
            rules: None,
            pretty: false,
        };
        assert_eq!(run_options(&args).unwrap(), 0);
    }

    #[test]
    fn missing_table_is_a_failure() {
        let args = OptionsArgs {
            rules: Some(PathBuf::from("/missing/rules.json")),
            pretty: false,
        };
        assert_eq!(run_options(&args).unwrap(), 1);
    }
}
