//! # Scoping API
//!
//! The evaluation surface: submit a scoping questionnaire profile, receive
//! the applicable jurisdictions, regulators, and frameworks with per-rule
//! rationale; and fetch the option lists that populate the questionnaire
//! form.
//!
//! Request validation mirrors the questionnaire schema — the required list
//! fields must be non-empty here, while the engine itself stays tolerant of
//! empty sets (partial profiles are evaluated elsewhere, e.g. by the CLI).

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use regscope_core::{AnnualRevenueBand, CompanySize, DataSubjectBand, OrganizationProfile};
use regscope_rules::EvaluationResult;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Scoping questionnaire submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EvaluateScopeRequest {
    /// Company size band: startup, sme, large, or enterprise.
    #[schema(value_type = String, example = "sme")]
    pub company_size: CompanySize,
    /// Sector codes (at least one).
    pub sectors: Vec<String>,
    /// Data-category codes (at least one).
    pub data_types: Vec<String>,
    /// Jurisdiction codes where systems reside (at least one).
    pub system_locations: Vec<String>,
    #[serde(default)]
    pub has_data_processors: bool,
    #[serde(default)]
    pub is_public_sector: bool,
    #[serde(default)]
    pub handles_special_categories: bool,
    /// Optional headcount detail.
    #[serde(default)]
    pub employee_count: Option<u32>,
    /// Optional annual revenue band.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "1m_10m")]
    pub annual_revenue: Option<AnnualRevenueBand>,
    /// Optional data subject count band.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "10k_100k")]
    pub data_subject_count: Option<DataSubjectBand>,
}

impl Validate for EvaluateScopeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.sectors.is_empty() {
            return Err("sectors must contain at least one sector code".to_string());
        }
        if self.data_types.is_empty() {
            return Err("data_types must contain at least one data-category code".to_string());
        }
        if self.system_locations.is_empty() {
            return Err(
                "system_locations must contain at least one jurisdiction code".to_string(),
            );
        }
        if self.employee_count == Some(0) {
            return Err("employee_count must be at least 1 when provided".to_string());
        }
        Ok(())
    }
}

impl EvaluateScopeRequest {
    fn into_profile(self) -> OrganizationProfile {
        OrganizationProfile {
            company_size: self.company_size,
            sectors: self.sectors,
            data_types: self.data_types,
            system_locations: self.system_locations,
            has_data_processors: self.has_data_processors,
            is_public_sector: self.is_public_sector,
            handles_special_categories: self.handles_special_categories,
            employee_count: self.employee_count,
            annual_revenue: self.annual_revenue,
            data_subject_count: self.data_subject_count,
        }
    }
}

/// Evaluation outcome with a per-request audit envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluateScopeResponse {
    /// Unique id for this evaluation, for audit correlation.
    pub evaluation_id: Uuid,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
    /// Applicable jurisdiction codes, sorted.
    pub jurisdictions: Vec<String>,
    /// Relevant regulator names, sorted.
    pub regulators: Vec<String>,
    /// Required framework codes, sorted.
    pub frameworks: Vec<String>,
    /// Justification per matched rule, keyed by rule id.
    pub rationale: BTreeMap<String, String>,
    /// Matched rule ids in rule-table order.
    pub matched_rule_ids: Vec<String>,
}

impl EvaluateScopeResponse {
    fn from_result(result: EvaluationResult) -> Self {
        Self {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            jurisdictions: result.jurisdictions.into_iter().collect(),
            regulators: result.regulators.into_iter().collect(),
            frameworks: result.frameworks.into_iter().collect(),
            rationale: result
                .rationale
                .into_iter()
                .map(|(id, text)| (id.as_str().to_string(), text))
                .collect(),
            matched_rule_ids: result
                .matched_rule_ids
                .into_iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

/// Questionnaire option lists.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScopeOptionsResponse {
    pub sectors: Vec<String>,
    pub data_types: Vec<String>,
    pub jurisdictions: Vec<String>,
}

/// Build the scoping router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/scope/evaluate", post(evaluate_scope))
        .route("/v1/scope/options", get(scope_options))
}

/// POST /v1/scope/evaluate — Evaluate a scoping questionnaire profile.
#[utoipa::path(
    post,
    path = "/v1/scope/evaluate",
    request_body = EvaluateScopeRequest,
    responses(
        (status = 200, description = "Evaluation outcome", body = EvaluateScopeResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "scope"
)]
pub(crate) async fn evaluate_scope(
    State(state): State<AppState>,
    body: Result<Json<EvaluateScopeRequest>, JsonRejection>,
) -> Result<Json<EvaluateScopeResponse>, AppError> {
    let request = extract_validated_json(body)?;
    let profile = request.into_profile();

    let result = state.engine.evaluate(&profile);
    tracing::info!(
        matched = result.matched_rule_ids.len(),
        frameworks = result.frameworks.len(),
        "scope evaluated"
    );

    Ok(Json(EvaluateScopeResponse::from_result(result)))
}

/// GET /v1/scope/options — Questionnaire option lists.
#[utoipa::path(
    get,
    path = "/v1/scope/options",
    responses(
        (status = 200, description = "Available questionnaire options", body = ScopeOptionsResponse),
    ),
    tag = "scope"
)]
pub(crate) async fn scope_options(State(state): State<AppState>) -> Json<ScopeOptionsResponse> {
    let options = state.engine.options();
    Json(ScopeOptionsResponse {
        sectors: options.sectors,
        data_types: options.data_types,
        jurisdictions: options.jurisdictions,
    })
}
