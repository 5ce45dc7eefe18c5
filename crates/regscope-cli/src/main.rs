//! # regscope CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regscope_cli::evaluate::{run_evaluate, EvaluateArgs};
use regscope_cli::options::{run_options, OptionsArgs};
use regscope_cli::validate::{run_validate, ValidateArgs};

/// Regscope CLI
///
/// Tooling for regulatory scoping rule tables: validation, profile
/// evaluation, and questionnaire option lookup.
#[derive(Parser, Debug)]
#[command(name = "regscope", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a rule table file (structure and condition names).
    Validate(ValidateArgs),

    /// Evaluate an organization profile against a rule table.
    Evaluate(EvaluateArgs),

    /// Print the questionnaire option lists carried by a rule table.
    Options(OptionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Options(args) => run_options(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
