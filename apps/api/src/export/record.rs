//! The self-assessment record: one flat row per respondent, written to the
//! output directory and offered for download.
//!
//! Records are never cleaned up. A second submission under the same name
//! overwrites the first.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::assessment::validation::RespondentProfile;
use crate::errors::AppError;
use crate::export::sanitize_name;
use crate::reference::models::ReferenceData;

pub const NAME_COLUMN: &str = "Nombre";
pub const JOB_TITLE_COLUMN: &str = "Puesto";
pub const AREA_COLUMN: &str = "Area";

#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Text(String),
    Number(f64),
}

/// Ordered `(column, value)` pairs of the exported row.
pub type RecordRow = Vec<(String, RecordValue)>;

/// `autoevaluacion_<Name_with_underscores>.xlsx`
pub fn record_filename(name: &str) -> String {
    format!("autoevaluacion_{}.xlsx", sanitize_name(name))
}

/// Nombre, Puesto, Area, the competency points in set order, then every
/// behavior rating in group order.
pub fn build_record(reference: &ReferenceData, profile: &RespondentProfile) -> RecordRow {
    let mut row: RecordRow = vec![
        (NAME_COLUMN.to_string(), RecordValue::Text(profile.name.clone())),
        (
            JOB_TITLE_COLUMN.to_string(),
            RecordValue::Text(profile.job_title.clone()),
        ),
        (AREA_COLUMN.to_string(), RecordValue::Text(profile.area.clone())),
    ];

    row.extend(
        reference
            .competency_set()
            .names()
            .iter()
            .zip(profile.competencies.points())
            .map(|(name, &points)| (name.clone(), RecordValue::Number(f64::from(points)))),
    );

    row.extend(
        profile
            .behaviors
            .iter(&reference.behavior_groups)
            .map(|(item, rating)| (item.column.clone(), RecordValue::Number(f64::from(rating)))),
    );

    row
}

/// Encodes the record as a one-row workbook with a bold header.
pub fn render_record(row: &RecordRow) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, (column, value)) in row.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string_with_format(0, col, column, &header_format)?;
        match value {
            RecordValue::Text(text) => worksheet.write_string(1, col, text)?,
            RecordValue::Number(n) => worksheet.write_number(1, col, *n)?,
        };
    }

    workbook.save_to_buffer()
}

/// A record written to the output directory.
#[derive(Debug, Clone)]
pub struct SavedRecord {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Renders and writes the record to `output_dir`, off the async runtime.
pub async fn save_record(output_dir: &Path, name: &str, row: RecordRow) -> Result<SavedRecord, AppError> {
    let filename = record_filename(name);
    let path = output_dir.join(&filename);

    let task_path = path.clone();
    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, AppError> {
        let bytes = render_record(&row)?;
        std::fs::write(&task_path, &bytes)
            .with_context(|| format!("writing record to {}", task_path.display()))?;
        Ok(bytes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("task join error: {e}")))??;

    info!(file = %path.display(), "Self-assessment record saved");

    Ok(SavedRecord {
        filename,
        path,
        bytes,
    })
}
