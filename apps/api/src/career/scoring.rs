//! Career-plan scoring: compares a respondent's competency vector with every
//! job's reference vector and ranks the jobs by similarity.
//!
//! `AppState` holds an `Arc<dyn ProfileScorer>`; `EuclideanScorer` is the
//! only backend.

use serde::Serialize;

use crate::reference::models::{CellValue, CompetencyReferenceTable};

/// Score of a job whose reference profile equals the respondent's.
pub const PERFECT_SCORE: f64 = 5.0;

/// Header of the column appended to the ranked table.
pub const SCORE_COLUMN: &str = "Score";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A reference row with its computed similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredJobRow {
    pub area: String,
    pub job_title: String,
    pub score: f64,
    /// The full reference row in header order.
    pub cells: Vec<CellValue>,
}

/// The ranked table: reference header plus `Score`, best match first.
#[derive(Debug, Clone, Serialize)]
pub struct CareerPlan {
    pub header: Vec<String>,
    pub rows: Vec<ScoredJobRow>,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Similarity between two competency vectors of equal length. Higher is
/// more similar.
pub trait ProfileScorer: Send + Sync {
    fn backend(&self) -> &'static str;

    fn score(&self, person: &[f64], job: &[f64]) -> f64;
}

// ────────────────────────────────────────────────────────────────────────────
// EuclideanScorer
// ────────────────────────────────────────────────────────────────────────────

/// `score = 5 − ‖person − job‖₂`.
///
/// No floor is applied: distant profiles score below zero, which keeps the
/// ranking intact and is shown to the user as-is.
pub struct EuclideanScorer;

impl ProfileScorer for EuclideanScorer {
    fn backend(&self) -> &'static str {
        "euclidean"
    }

    fn score(&self, person: &[f64], job: &[f64]) -> f64 {
        PERFECT_SCORE - euclidean_distance(person, job)
    }
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// Scores every complete reference row against `person` and sorts by score,
/// descending. Rows missing any competency value are left out. The sort is
/// stable, so equal scores keep table order.
pub fn rank_jobs(
    scorer: &dyn ProfileScorer,
    table: &CompetencyReferenceTable,
    person: &[f64],
) -> CareerPlan {
    let mut rows: Vec<ScoredJobRow> = table
        .rows
        .iter()
        .filter_map(|row| {
            let job = row.competency_vector()?;
            Some(ScoredJobRow {
                area: row.area.clone(),
                job_title: row.job_title.clone(),
                score: scorer.score(person, &job),
                cells: row.cells.clone(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut header = table.header.clone();
    header.push(SCORE_COLUMN.to_string());

    CareerPlan {
        header,
        rows,
        scorer_backend: scorer.backend().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
