//! # Application State
//!
//! Shared state for the API: the rules engine (immutable, loaded once at
//! startup) and service configuration. The engine is wrapped in an `Arc`
//! and never mutated after construction, so concurrent request handlers
//! share it without locking.

use std::path::PathBuf;
use std::sync::Arc;

use regscope_rules::{loader, PredicateRegistry, RulesEngine, RulesResult};

/// Service configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind (default 8080).
    pub port: u16,
    /// Optional path to a rule table file; the bundled table is used when
    /// absent.
    pub rules_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rules_path: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from `PORT` and `RULES_PATH` environment
    /// variables, falling back to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let rules_path = std::env::var("RULES_PATH").ok().map(PathBuf::from);
        Self { port, rules_path }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The rules engine, constructed once at startup.
    pub engine: Arc<RulesEngine>,
    /// Service configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from configuration, loading the configured rule table
    /// (or the bundled one) and validating it against the builtin
    /// predicate registry.
    ///
    /// # Errors
    ///
    /// Fails fast if the table cannot be loaded or references unknown
    /// condition names — the service must not start with a partial table.
    pub fn from_config(config: AppConfig) -> RulesResult<Self> {
        let table = match config.rules_path {
            Some(ref path) => loader::from_path(path)?,
            None => loader::builtin_table()?,
        };
        let engine = RulesEngine::new(table, PredicateRegistry::builtin())?;
        Ok(Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
        })
    }

    /// Build state around an already-constructed engine. Useful in tests
    /// with fixture tables.
    pub fn with_engine(engine: RulesEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(AppConfig::default()),
        }
    }
}
