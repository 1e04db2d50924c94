//! Axum route handlers for the area and job-title dropdowns.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::reference::selection::{areas, job_titles};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JobTitlesResponse {
    pub area: String,
    pub job_titles: Vec<String>,
}

/// GET /api/v1/areas
pub async fn handle_list_areas(State(state): State<AppState>) -> Json<AreasResponse> {
    Json(AreasResponse {
        areas: areas(&state.reference.competencies),
    })
}

/// GET /api/v1/areas/:area/jobs
///
/// An unknown area returns an empty list rather than an error.
pub async fn handle_list_job_titles(
    State(state): State<AppState>,
    Path(area): Path<String>,
) -> Json<JobTitlesResponse> {
    let job_titles = job_titles(&state.reference.competencies, &area);
    Json(JobTitlesResponse { area, job_titles })
}
