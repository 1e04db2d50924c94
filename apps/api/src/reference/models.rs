use std::collections::HashSet;

use serde::Serialize;

use crate::assessment::behaviors::{group_behaviors, BehaviorGroup};
use crate::errors::DataLoadError;

/// Number of competencies every assessment allocates points across.
pub const COMPETENCY_COUNT: usize = 8;

/// A single spreadsheet cell as read from the reference workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell. Numeric text such as `"15"` counts as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Label view of the cell, `None` when blank.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_label().is_none()
    }
}

/// Renders whole numbers without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// The ordered competency names that define the allocation budget and the
/// scoring vector space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompetencySet {
    names: Vec<String>,
}

impl CompetencySet {
    pub fn new(names: Vec<String>) -> Result<Self, DataLoadError> {
        if names.len() != COMPETENCY_COUNT {
            return Err(DataLoadError::InvalidCompetencySet(format!(
                "expected {COMPETENCY_COUNT} competencies, found {}",
                names.len()
            )));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(DataLoadError::InvalidCompetencySet(
                "competency names cannot be blank".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(DataLoadError::InvalidCompetencySet(format!(
                "competency '{dup}' is listed twice"
            )));
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// One usable row of the "Competencias" sheet.
#[derive(Debug, Clone)]
pub struct JobRow {
    pub area: String,
    pub job_title: String,
    /// Reference scores in `CompetencySet` order; `None` where the cell is missing.
    pub competencies: Vec<Option<f64>>,
    /// Every cell of the row in header order, metadata columns included.
    pub cells: Vec<CellValue>,
}

impl JobRow {
    /// The reference vector, or `None` if any competency value is missing.
    pub fn competency_vector(&self) -> Option<Vec<f64>> {
        self.competencies.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompetencyReferenceTable {
    pub header: Vec<String>,
    pub competencies: CompetencySet,
    pub rows: Vec<JobRow>,
}

#[derive(Debug, Clone)]
pub struct BehaviorRow {
    pub competency: String,
    /// Statement text as stored in the workbook, enumeration prefix included.
    pub statement: String,
}

#[derive(Debug, Clone, Default)]
pub struct BehaviorReferenceTable {
    pub rows: Vec<BehaviorRow>,
}

impl BehaviorReferenceTable {
    pub fn statements_for<'a>(&'a self, competency: &'a str) -> impl Iterator<Item = &'a str> {
        self.rows
            .iter()
            .filter(move |r| r.competency == competency)
            .map(|r| r.statement.as_str())
    }
}

/// Reference data loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub competencies: CompetencyReferenceTable,
    pub behaviors: BehaviorReferenceTable,
    /// Cleaned behavior statements grouped per competency, in set order.
    pub behavior_groups: Vec<BehaviorGroup>,
}

impl ReferenceData {
    pub fn new(competencies: CompetencyReferenceTable, behaviors: BehaviorReferenceTable) -> Self {
        let behavior_groups = group_behaviors(&competencies.competencies, &behaviors);
        Self {
            competencies,
            behaviors,
            behavior_groups,
        }
    }

    pub fn competency_set(&self) -> &CompetencySet {
        &self.competencies.competencies
    }
}
