//! Fixture reference workbook shared by the unit tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rust_xlsxwriter::Workbook;

use crate::assessment::validation::SubmissionRequest;
use crate::career::scoring::EuclideanScorer;
use crate::config::Config;
use crate::reference::loader::{
    load_reference_data_from_bytes, CompetencyColumns, BEHAVIOR_SHEET, COMPETENCY_SHEET,
};
use crate::reference::models::{CompetencySet, ReferenceData};
use crate::state::AppState;

pub const COMPETENCIES: [&str; 8] = [
    "Comunicación",
    "Liderazgo",
    "Trabajo en equipo",
    "Orientación a resultados",
    "Innovación",
    "Visión estratégica",
    "Gestión del cambio",
    "Conocimiento técnico",
];

type JobFixture = (&'static str, &'static str, &'static str, [Option<f64>; 8]);

fn full(v: [f64; 8]) -> [Option<f64>; 8] {
    v.map(Some)
}

fn jobs() -> Vec<JobFixture> {
    let mut contador = full([30.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
    contador[5] = None;
    vec![
        ("Tecnología", "Desarrollador", "Senior", full([10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 30.0])),
        ("Tecnología", "Arquitecto", "Senior", full([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0])),
        ("Finanzas", "Analista", "Junior", full([20.0, 20.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0])),
        ("Finanzas", "Tesorero", "Senior", full([20.0, 20.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0])),
        ("Finanzas", "Contador", "Junior", contador),
        ("Recursos Humanos", "Reclutador", "Junior", full([15.0, 15.0, 15.0, 15.0, 10.0, 10.0, 10.0, 10.0])),
        ("", "Sin Area", "Junior", full([12.5; 8])),
    ]
}

const BEHAVIORS: [(&str, &str); 7] = [
    ("Comunicación", "1. Escucha activamente a los demás"),
    ("Comunicación", "2. Expresa ideas con claridad"),
    ("Liderazgo", "1. Inspira al equipo"),
    ("Liderazgo", "2. Delega responsabilidades"),
    ("Trabajo en equipo", "1. Comparte información"),
    ("Innovación", "a. Propone mejoras"),
    ("Innovación", "3. Comparte información"),
];

/// Workbook with both sheets. The competency sheet has one metadata column
/// before the competencies ("Nivel") and one after ("Notas").
pub fn fixture_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(COMPETENCY_SHEET).unwrap();
    let mut header = vec!["Area", "Job Title", "Nivel"];
    header.extend(COMPETENCIES);
    header.push("Notas");
    for (c, title) in header.iter().enumerate() {
        sheet.write_string(0, c as u16, *title).unwrap();
    }
    for (r, (area, title, level, values)) in jobs().into_iter().enumerate() {
        let r = r as u32 + 1;
        if !area.is_empty() {
            sheet.write_string(r, 0, area).unwrap();
        }
        sheet.write_string(r, 1, title).unwrap();
        sheet.write_string(r, 2, level).unwrap();
        for (i, v) in values.iter().enumerate() {
            if let Some(v) = v {
                sheet.write_number(r, 3 + i as u16, *v).unwrap();
            }
        }
        sheet.write_string(r, 11, "revisado").unwrap();
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(BEHAVIOR_SHEET).unwrap();
    sheet.write_string(0, 0, "Competencias").unwrap();
    sheet.write_string(0, 1, "Comportamientos").unwrap();
    for (r, (competency, statement)) in BEHAVIORS.iter().enumerate() {
        sheet.write_string(r as u32 + 1, 0, *competency).unwrap();
        sheet.write_string(r as u32 + 1, 1, *statement).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

/// Workbook containing only the named (empty) sheets.
pub fn workbook_with_sheets(names: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for name in names {
        workbook.add_worksheet().set_name(*name).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

pub fn fixture_reference() -> ReferenceData {
    load_reference_data_from_bytes(fixture_workbook(), &CompetencyColumns::Positional).unwrap()
}

pub fn allocation_input(set: &CompetencySet, points: [i64; 8]) -> BTreeMap<String, i64> {
    set.names().iter().cloned().zip(points).collect()
}

/// A submission for Tecnología / Desarrollador with default behavior ratings.
pub fn submission(data: &ReferenceData, name: &str, points: [i64; 8]) -> SubmissionRequest {
    SubmissionRequest {
        name: Some(name.to_string()),
        area: Some("Tecnología".to_string()),
        job_title: Some("Desarrollador".to_string()),
        competencies: allocation_input(data.competency_set(), points),
        behaviors: Vec::new(),
    }
}

pub fn test_state(output_dir: &Path) -> AppState {
    AppState {
        config: Config {
            reference_workbook: "fixture.xlsx".into(),
            output_dir: output_dir.to_path_buf(),
            competency_columns: CompetencyColumns::Positional,
            port: 0,
            rust_log: "info".to_string(),
        },
        reference: Arc::new(fixture_reference()),
        scorer: Arc::new(EuclideanScorer),
    }
}
