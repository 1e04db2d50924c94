//! Axum route handlers for the career plan.

use axum::{extract::State, Json};
use tracing::info;

use crate::assessment::validation::{validate_submission, RespondentProfile, SubmissionRequest};
use crate::career::scoring::{rank_jobs, CareerPlan};
use crate::errors::AppError;
use crate::export::career_plan::{plan_filename, render_career_plan};
use crate::export::record::{build_record, save_record};
use crate::export::Download;
use crate::extract::ApiJson;
use crate::state::AppState;

fn validated(state: &AppState, request: &SubmissionRequest) -> Result<RespondentProfile, AppError> {
    validate_submission(&state.reference, request).inspect_err(|e| {
        info!(code = e.code(), "Career plan request rejected: {e}");
    })
}

fn plan_for(state: &AppState, profile: &RespondentProfile) -> CareerPlan {
    let plan = rank_jobs(
        state.scorer.as_ref(),
        &state.reference.competencies,
        &profile.competencies.as_vector(),
    );
    info!(
        area = %profile.area,
        job_title = %profile.job_title,
        ranked_jobs = plan.rows.len(),
        best_match = plan.rows.first().map(|r| r.job_title.as_str()).unwrap_or("-"),
        "Career plan computed"
    );
    plan
}

/// POST /api/v1/career-plan
///
/// Save-and-plan submission: validates, saves the self-assessment record,
/// then returns the ranked plan as a download. The plan is built in memory
/// and never written to disk.
pub async fn handle_career_plan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmissionRequest>,
) -> Result<Download, AppError> {
    let profile = validated(&state, &request)?;

    let row = build_record(&state.reference, &profile);
    let saved = save_record(&state.config.output_dir, &profile.name, row).await?;

    let plan = plan_for(&state, &profile);
    let bytes = tokio::task::spawn_blocking(move || render_career_plan(&plan))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Download {
        filename: plan_filename(&profile.name),
        bytes,
        saved_record: Some(saved.filename),
    })
}

/// POST /api/v1/career-plan/preview
///
/// The ranked plan as JSON. Nothing is written.
pub async fn handle_career_plan_preview(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmissionRequest>,
) -> Result<Json<CareerPlan>, AppError> {
    let profile = validated(&state, &request)?;
    Ok(Json(plan_for(&state, &profile)))
}
