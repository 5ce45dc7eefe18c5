//! # regscope-rules — Declarative Regulatory Scoping
//!
//! Maps an organization's scoping questionnaire profile to the regulatory
//! frameworks, regulators, and jurisdictions that apply to it, via a
//! declarative rule table with conjunctive trigger matching and
//! deterministic fan-out aggregation.
//!
//! ## Architecture
//!
//! ```text
//! regscope-core (profile)  -->  regscope-rules (this crate)
//!   OrganizationProfile          RuleTable + PredicateRegistry
//!                                       |
//!                                 RulesEngine::evaluate
//!                                       v
//!                                EvaluationResult
//! ```
//!
//! - [`rule`]: the [`Rule`]/[`RuleTable`] data model and trigger-matching
//!   semantics.
//! - [`predicate`]: named composite conditions computed over the full
//!   profile, behind an extensible [`PredicateRegistry`].
//! - [`engine`]: the [`RulesEngine`] — pure, deterministic, monotonic
//!   fan-out evaluation.
//! - [`loader`]: JSON/YAML table loading with fail-fast validation, plus
//!   the bundled default table.
//!
//! ## Crate Policy
//!
//! - Evaluation is a pure function of (profile, table): no I/O, no clock,
//!   no randomness, no shared mutable state. Concurrent evaluations against
//!   a shared engine are safe by construction.
//! - Malformed tables fail at load/construction time; evaluation itself is
//!   infallible.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod engine;
pub mod error;
pub mod loader;
pub mod predicate;
pub mod rule;

// Re-export primary types for ergonomic imports.
pub use engine::{EvaluationResult, RulesEngine};
pub use error::{RulesError, RulesResult};
pub use predicate::{PredicateRegistry, EU_JURISDICTIONS};
pub use rule::{Rule, RuleResults, RuleTable, RuleTriggers, ScopeOptions};
