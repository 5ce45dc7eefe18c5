//! API route modules.

pub mod scope;
