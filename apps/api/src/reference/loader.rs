//! Reads the reference workbook into typed tables.
//!
//! The workbook carries two sheets: `Competencias` (one row per job with its
//! reference competency scores) and `Comportamientos` (behavior statements
//! keyed by competency name).

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx};
use tracing::{debug, info};

use crate::errors::DataLoadError;
use crate::reference::models::{
    BehaviorReferenceTable, BehaviorRow, CellValue, CompetencyReferenceTable, CompetencySet,
    JobRow, ReferenceData, COMPETENCY_COUNT,
};

pub const COMPETENCY_SHEET: &str = "Competencias";
pub const BEHAVIOR_SHEET: &str = "Comportamientos";

const AREA_COLUMN: &str = "Area";
const JOB_TITLE_COLUMN: &str = "Job Title";
const BEHAVIOR_COMPETENCY_COLUMN: &str = "Competencias";
const BEHAVIOR_STATEMENT_COLUMN: &str = "Comportamientos";

/// Header index of the first competency column in the legacy positional layout.
const LEGACY_FIRST_COMPETENCY: usize = 3;

/// How the competency columns are located in the `Competencias` header.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CompetencyColumns {
    /// Header columns 4–11, the layout of the original workbook.
    #[default]
    Positional,
    /// Explicit column names; every one must exist in the header.
    Named(Vec<String>),
}

/// Loads the reference workbook from disk.
pub fn load_reference_data(
    path: &Path,
    columns: &CompetencyColumns,
) -> Result<ReferenceData, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::MissingFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data = load_reference_data_from_bytes(bytes, columns)?;

    info!(
        path = %path.display(),
        jobs = data.competencies.rows.len(),
        behaviors = data.behaviors.rows.len(),
        "Reference workbook loaded"
    );
    Ok(data)
}

/// Loads a reference workbook held in memory.
pub fn load_reference_data_from_bytes(
    bytes: Vec<u8>,
    columns: &CompetencyColumns,
) -> Result<ReferenceData, DataLoadError> {
    let workbook = Xlsx::new(Cursor::new(bytes))?;
    read_workbook(workbook, columns)
}

fn read_workbook<RS: Read + Seek>(
    mut workbook: Xlsx<RS>,
    columns: &CompetencyColumns,
) -> Result<ReferenceData, DataLoadError> {
    let competency_range = read_sheet(&mut workbook, COMPETENCY_SHEET)?;
    let behavior_range = read_sheet(&mut workbook, BEHAVIOR_SHEET)?;

    let competencies = parse_competency_sheet(&competency_range, columns)?;
    let behaviors = parse_behavior_sheet(&behavior_range)?;

    Ok(ReferenceData::new(competencies, behaviors))
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    name: &str,
) -> Result<Range<Data>, DataLoadError> {
    if !workbook.sheet_names().iter().any(|s| s == name) {
        return Err(DataLoadError::MissingSheet(name.to_string()));
    }
    Ok(workbook.worksheet_range(name)?)
}

fn parse_competency_sheet(
    range: &Range<Data>,
    columns: &CompetencyColumns,
) -> Result<CompetencyReferenceTable, DataLoadError> {
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(header_label).collect())
        .unwrap_or_default();

    let area_idx = column_index(&header, COMPETENCY_SHEET, AREA_COLUMN)?;
    let job_idx = column_index(&header, COMPETENCY_SHEET, JOB_TITLE_COLUMN)?;
    let (competencies, competency_idx) = resolve_competency_columns(&header, columns)?;

    let mut jobs = Vec::new();
    let mut dropped = 0usize;
    for raw in rows {
        let cells: Vec<CellValue> = (0..header.len())
            .map(|i| raw.get(i).map(cell_value).unwrap_or(CellValue::Empty))
            .collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }

        let (Some(area), Some(job_title)) = (cells[area_idx].as_label(), cells[job_idx].as_label())
        else {
            dropped += 1;
            continue;
        };

        let values = competency_idx.iter().map(|&i| cells[i].as_number()).collect();
        jobs.push(JobRow {
            area,
            job_title,
            competencies: values,
            cells,
        });
    }

    let incomplete = jobs
        .iter()
        .filter(|j| j.competency_vector().is_none())
        .count();
    debug!(
        dropped_without_area_or_title = dropped,
        incomplete_competency_rows = incomplete,
        "Parsed {} sheet",
        COMPETENCY_SHEET
    );

    Ok(CompetencyReferenceTable {
        header,
        competencies,
        rows: jobs,
    })
}

fn parse_behavior_sheet(range: &Range<Data>) -> Result<BehaviorReferenceTable, DataLoadError> {
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(header_label).collect())
        .unwrap_or_default();

    let competency_idx = column_index(&header, BEHAVIOR_SHEET, BEHAVIOR_COMPETENCY_COLUMN)?;
    let statement_idx = column_index(&header, BEHAVIOR_SHEET, BEHAVIOR_STATEMENT_COLUMN)?;

    let rows = rows
        .filter_map(|raw| {
            // Matched against header labels, which are trimmed.
            let competency = raw.get(competency_idx).map(header_label)?;
            if competency.is_empty() {
                return None;
            }
            let statement = raw.get(statement_idx).map(cell_value)?.as_label()?;
            Some(BehaviorRow {
                competency,
                statement,
            })
        })
        .collect();

    Ok(BehaviorReferenceTable { rows })
}

fn resolve_competency_columns(
    header: &[String],
    columns: &CompetencyColumns,
) -> Result<(CompetencySet, Vec<usize>), DataLoadError> {
    match columns {
        CompetencyColumns::Named(names) => {
            let missing: Vec<String> = names
                .iter()
                .filter(|n| !header.contains(n))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(DataLoadError::MissingCompetencyColumns(missing));
            }
            let set = CompetencySet::new(names.clone())?;
            let idx = names
                .iter()
                .filter_map(|n| header.iter().position(|h| h == n))
                .collect();
            info!("Competency set taken from configuration");
            Ok((set, idx))
        }
        CompetencyColumns::Positional => {
            let end = LEGACY_FIRST_COMPETENCY + COMPETENCY_COUNT;
            let Some(names) = header.get(LEGACY_FIRST_COMPETENCY..end) else {
                return Err(DataLoadError::InvalidCompetencySet(format!(
                    "positional layout needs at least {end} header columns, found {}",
                    header.len()
                )));
            };
            let set = CompetencySet::new(names.to_vec())?;
            info!(
                competencies = ?set.names(),
                "Competency set taken from header columns 4-11"
            );
            Ok((set, (LEGACY_FIRST_COMPETENCY..end).collect()))
        }
    }
}

fn column_index(header: &[String], sheet: &str, column: &str) -> Result<usize, DataLoadError> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataLoadError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        })
}

fn header_label(cell: &Data) -> String {
    cell_value(cell)
        .as_label()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string().to_uppercase()),
        _ => CellValue::Empty,
    }
}
