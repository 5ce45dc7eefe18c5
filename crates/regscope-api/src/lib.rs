//! # regscope-api — Axum API Service for the Regscope Stack
//!
//! Exposes the rules engine over HTTP for the questionnaire frontend and
//! downstream consumers.
//!
//! ## API Surface
//!
//! | Route                   | Module            | Purpose                         |
//! |-------------------------|-------------------|---------------------------------|
//! | `POST /v1/scope/evaluate` | [`routes::scope`] | Evaluate a questionnaire profile |
//! | `GET /v1/scope/options`   | [`routes::scope`] | Questionnaire option lists       |
//! | `GET /openapi.json`       | [`openapi`]       | OpenAPI spec                     |
//! | `GET /health/*`           | (here)            | Liveness/readiness probes        |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the traced API router so
/// probe traffic does not flood the request log.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::scope::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the rule table is loaded at startup, so a running
/// process is a ready process.
async fn readiness() -> &'static str {
    "ready"
}
