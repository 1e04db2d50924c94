pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::career::handlers as career;
use crate::errors::AppError;
use crate::reference::handlers as reference;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Selection
        .route("/api/v1/areas", get(reference::handle_list_areas))
        .route(
            "/api/v1/areas/:area/jobs",
            get(reference::handle_list_job_titles),
        )
        // Self-assessment form
        .route("/api/v1/form", get(assessment::handle_form_schema))
        .route(
            "/api/v1/assessments/total",
            post(assessment::handle_allocation_total),
        )
        .route(
            "/api/v1/assessments",
            post(assessment::handle_submit_assessment),
        )
        // Career plan
        .route("/api/v1/career-plan", post(career::handle_career_plan))
        .route(
            "/api/v1/career-plan/preview",
            post(career::handle_career_plan_preview),
        )
        .fallback(handle_not_found)
        .with_state(state)
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
