use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::reference::models::CompetencySet;

/// Points a respondent must distribute across the competency set.
pub const POINT_BUDGET: u32 = 100;
pub const MIN_POINTS: u32 = 0;
pub const MAX_POINTS: u32 = 100;

/// Integer points per competency, in `CompetencySet` order.
///
/// Collecting does not check the budget; callers compare `total()` against
/// `POINT_BUDGET` when the respondent submits.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyAllocation {
    points: Vec<u32>,
}

impl CompetencyAllocation {
    pub fn collect(set: &CompetencySet, input: &BTreeMap<String, i64>) -> Result<Self, AppError> {
        let mut points = vec![MIN_POINTS; set.names().len()];

        for (name, &value) in input {
            let idx = set.position(name).ok_or_else(|| {
                AppError::Validation(format!("unknown competency '{name}'"))
            })?;
            let value = u32::try_from(value)
                .ok()
                .filter(|v| (MIN_POINTS..=MAX_POINTS).contains(v))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "points for '{name}' must be between {MIN_POINTS} and {MAX_POINTS}, got {value}"
                    ))
                })?;
            points[idx] = value;
        }

        Ok(Self { points })
    }

    pub fn total(&self) -> u32 {
        self.points.iter().sum()
    }

    pub fn points(&self) -> &[u32] {
        &self.points
    }

    /// The respondent's vector for scoring.
    pub fn as_vector(&self) -> Vec<f64> {
        self.points.iter().map(|&p| f64::from(p)).collect()
    }
}
