//! Axum route handlers for the self-assessment form.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::behaviors::{BehaviorGroup, DEFAULT_RATING, MAX_RATING, MIN_RATING};
use crate::assessment::competencies::{CompetencyAllocation, MAX_POINTS, MIN_POINTS, POINT_BUDGET};
use crate::assessment::validation::{validate_submission, SubmissionRequest};
use crate::errors::AppError;
use crate::export::record::{build_record, save_record};
use crate::export::Download;
use crate::extract::ApiJson;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompetencyField {
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

#[derive(Debug, Serialize)]
pub struct RatingScale {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

#[derive(Debug, Serialize)]
pub struct FormSchemaResponse {
    pub budget: u32,
    pub competencies: Vec<CompetencyField>,
    pub rating_scale: RatingScale,
    pub behaviors: Vec<BehaviorGroup>,
}

#[derive(Debug, Deserialize)]
pub struct AllocationRequest {
    #[serde(default)]
    pub competencies: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
pub struct AllocationTotalResponse {
    pub total: u32,
    pub budget: u32,
    pub remaining: i64,
    pub complete: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/form
///
/// Everything a client needs to render the form: one stepper per competency
/// and one slider per behavior statement.
pub async fn handle_form_schema(State(state): State<AppState>) -> Json<FormSchemaResponse> {
    let competencies = state
        .reference
        .competency_set()
        .names()
        .iter()
        .map(|name| CompetencyField {
            name: name.clone(),
            min: MIN_POINTS,
            max: MAX_POINTS,
            step: 1,
            default: MIN_POINTS,
        })
        .collect();

    Json(FormSchemaResponse {
        budget: POINT_BUDGET,
        competencies,
        rating_scale: RatingScale {
            min: MIN_RATING,
            max: MAX_RATING,
            default: DEFAULT_RATING,
        },
        behaviors: state.reference.behavior_groups.clone(),
    })
}

/// POST /api/v1/assessments/total
///
/// Running total of a partial allocation. Never fails on the budget; the
/// client shows `remaining` while the respondent edits.
pub async fn handle_allocation_total(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AllocationRequest>,
) -> Result<Json<AllocationTotalResponse>, AppError> {
    let allocation =
        CompetencyAllocation::collect(state.reference.competency_set(), &request.competencies)?;
    let total = allocation.total();

    Ok(Json(AllocationTotalResponse {
        total,
        budget: POINT_BUDGET,
        remaining: i64::from(POINT_BUDGET) - i64::from(total),
        complete: total == POINT_BUDGET,
    }))
}

/// POST /api/v1/assessments
///
/// Save-only submission: validates, writes the record to the output
/// directory and returns it as a download.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmissionRequest>,
) -> Result<Download, AppError> {
    let profile = validate_submission(&state.reference, &request).inspect_err(|e| {
        info!(code = e.code(), "Self-assessment rejected: {e}");
    })?;

    info!(
        area = %profile.area,
        job_title = %profile.job_title,
        "Self-assessment accepted"
    );

    let row = build_record(&state.reference, &profile);
    let saved = save_record(&state.config.output_dir, &profile.name, row).await?;

    Ok(Download {
        filename: saved.filename,
        bytes: saved.bytes,
        saved_record: None,
    })
}
