//! # Error Types — Validation Failures at Construction Time
//!
//! Errors raised by validated constructors in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from validated type constructors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Rule identifier is empty or contains whitespace.
    #[error("invalid rule id {id:?}: {reason}")]
    InvalidRuleId {
        /// The rejected identifier string.
        id: String,
        /// Why it was rejected.
        reason: String,
    },

    /// String does not name a known company size band.
    #[error("unknown company size: {0:?}")]
    UnknownCompanySize(String),
}
