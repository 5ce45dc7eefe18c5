//! # regscope-cli — CLI Tool for the Regscope Stack
//!
//! Provides the `regscope` command-line interface for working with
//! regulatory scoping rule tables outside the HTTP service.
//!
//! ## Subcommands
//!
//! - `regscope validate` — Fail-fast rule table validation.
//! - `regscope evaluate` — Evaluate a profile JSON file against a table.
//! - `regscope options` — Print the questionnaire option lists.
//!
//! ```bash
//! regscope validate rules/regulator_rules.json
//! regscope evaluate --profile profile.json --pretty
//! regscope options
//! ```

pub mod evaluate;
pub mod options;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use regscope_rules::{loader, RuleTable};

/// Load a rule table from an optional path, falling back to the bundled
/// table when no path is given.
pub fn load_table(path: Option<&Path>) -> Result<RuleTable> {
    match path {
        Some(p) => loader::from_path(p)
            .with_context(|| format!("failed to load rule table from {}", p.display())),
        None => loader::builtin_table().context("failed to load bundled rule table"),
    }
}
