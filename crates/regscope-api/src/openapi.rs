//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Regscope API — Compliance Scoping",
        version = "0.3.2",
        description = "Evaluates an organization's scoping questionnaire against a declarative regulatory rule table, returning applicable jurisdictions, regulators, and frameworks with per-rule rationale.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::scope::evaluate_scope,
        crate::routes::scope::scope_options,
    ),
    components(schemas(
        crate::routes::scope::EvaluateScopeRequest,
        crate::routes::scope::EvaluateScopeResponse,
        crate::routes::scope::ScopeOptionsResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "scope", description = "Scoping questionnaire evaluation and options"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router. Serves the spec JSON at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
