use std::path::PathBuf;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Competency points must sum to exactly {budget} (currently {total})")]
    Budget { total: u32, budget: u32 },

    #[error("Please complete the required fields: {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("Unknown selection: {0}")]
    UnknownSelection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Spreadsheet export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code carried in the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Budget { .. } => "BUDGET_ERROR",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::UnknownSelection(_) => "UNKNOWN_SELECTION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Validation(msg) | AppError::UnknownSelection(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Budget { .. } | AppError::MissingField(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The spreadsheet could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Failure to load the reference workbook. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("reference workbook not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot read reference workbook {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot open reference workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("sheet '{0}' is missing from the reference workbook")]
    MissingSheet(String),

    #[error("sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("competency columns not found in the reference table: {}", .0.join(", "))]
    MissingCompetencyColumns(Vec<String>),

    #[error("invalid competency set: {0}")]
    InvalidCompetencySet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_message_states_required_total() {
        let err = AppError::Budget {
            total: 99,
            budget: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("exactly 100"));
        assert!(msg.contains("99"));
    }

    #[test]
    fn test_missing_field_lists_fields() {
        let err = AppError::MissingField(vec!["name", "job_title"]);
        assert_eq!(
            err.to_string(),
            "Please complete the required fields: name, job_title"
        );
    }

    #[test]
    fn test_status_codes() {
        let budget = AppError::Budget {
            total: 101,
            budget: 100,
        };
        assert_eq!(
            budget.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let missing = AppError::MissingField(vec!["name"]);
        assert_eq!(
            missing.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let invalid = AppError::Validation("rating out of range".into());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
        let not_found = AppError::NotFound("/nowhere".into());
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        let internal = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
