use std::collections::BTreeMap;

use serde::Deserialize;

use crate::assessment::behaviors::{BehaviorRatingInput, BehaviorRatings};
use crate::assessment::competencies::{CompetencyAllocation, POINT_BUDGET};
use crate::errors::AppError;
use crate::reference::models::ReferenceData;
use crate::reference::selection::is_valid_selection;

/// Body of both submit actions (save-only and save-and-plan).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub competencies: BTreeMap<String, i64>,
    #[serde(default)]
    pub behaviors: Vec<BehaviorRatingInput>,
}

/// A submission that passed every check.
#[derive(Debug, Clone)]
pub struct RespondentProfile {
    pub name: String,
    pub area: String,
    pub job_title: String,
    pub competencies: CompetencyAllocation,
    pub behaviors: BehaviorRatings,
}

/// Fails with `AppError::Budget` unless `total` is exactly the budget.
pub fn check_budget(total: u32) -> Result<(), AppError> {
    if total == POINT_BUDGET {
        Ok(())
    } else {
        Err(AppError::Budget {
            total,
            budget: POINT_BUDGET,
        })
    }
}

/// Returns trimmed `(name, area, job_title)` or the list of blank or absent fields.
pub fn check_required_fields<'a>(
    name: Option<&'a str>,
    area: Option<&'a str>,
    job_title: Option<&'a str>,
) -> Result<(&'a str, &'a str, &'a str), AppError> {
    let present = |v: Option<&'a str>| v.map(str::trim).filter(|s| !s.is_empty());
    let name = present(name);
    let area = present(area);
    let job_title = present(job_title);

    match (name, area, job_title) {
        (Some(n), Some(a), Some(j)) => Ok((n, a, j)),
        _ => {
            let missing = [("name", name), ("area", area), ("job_title", job_title)]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(field, _)| field)
                .collect();
            Err(AppError::MissingField(missing))
        }
    }
}

/// Runs the submission gate.
///
/// Order: input ranges, point budget, required fields, area/job membership,
/// behavior ratings. The first failure is returned; nothing is written.
pub fn validate_submission(
    reference: &ReferenceData,
    request: &SubmissionRequest,
) -> Result<RespondentProfile, AppError> {
    let competencies =
        CompetencyAllocation::collect(reference.competency_set(), &request.competencies)?;
    check_budget(competencies.total())?;

    let (name, area, job_title) = check_required_fields(
        request.name.as_deref(),
        request.area.as_deref(),
        request.job_title.as_deref(),
    )?;

    if !is_valid_selection(&reference.competencies, area, job_title) {
        return Err(AppError::UnknownSelection(format!(
            "'{job_title}' is not a job title of area '{area}'"
        )));
    }

    let behaviors = BehaviorRatings::collect(&reference.behavior_groups, &request.behaviors)?;

    Ok(RespondentProfile {
        name: name.to_string(),
        area: area.to_string(),
        job_title: job_title.to_string(),
        competencies,
        behaviors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_reference, submission};

    #[test]
    fn test_exact_budget_passes() {
        assert!(check_budget(100).is_ok());
    }

    #[test]
    fn test_budget_is_exact_in_both_directions() {
        for total in [0, 99, 101, 200] {
            assert!(matches!(
                check_budget(total),
                Err(AppError::Budget { total: t, budget: 100 }) if t == total
            ));
        }
    }

    #[test]
    fn test_blank_name_is_missing() {
        let err = check_required_fields(Some("   "), Some("Finanzas"), Some("Analista")).unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref f) if f == &vec!["name"]));
    }

    #[test]
    fn test_all_missing_fields_are_listed() {
        let err = check_required_fields(Some(""), None, Some("")).unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref f) if f == &vec!["name", "area", "job_title"]));
    }

    #[test]
    fn test_absent_name_is_missing() {
        let data = fixture_reference();
        let mut req = submission(&data, "Ana López", [50, 50, 0, 0, 0, 0, 0, 0]);
        req.name = None;
        assert!(matches!(
            validate_submission(&data, &req),
            Err(AppError::MissingField(ref f)) if f == &vec!["name"]
        ));
    }

    #[test]
    fn test_valid_submission_produces_profile() {
        let data = fixture_reference();
        let req = submission(&data, "  Ana López ", [50, 50, 0, 0, 0, 0, 0, 0]);
        let profile = validate_submission(&data, &req).unwrap();
        assert_eq!(profile.name, "Ana López");
        assert_eq!(profile.competencies.total(), 100);
    }

    #[test]
    fn test_sum_of_101_is_budget_error() {
        let data = fixture_reference();
        let req = submission(&data, "Ana López", [50, 50, 0, 0, 0, 0, 0, 1]);
        assert!(matches!(
            validate_submission(&data, &req),
            Err(AppError::Budget { total: 101, .. })
        ));
    }

    #[test]
    fn test_empty_name_is_missing_field_even_with_valid_total() {
        let data = fixture_reference();
        let req = submission(&data, "", [10, 10, 10, 10, 10, 10, 10, 30]);
        assert!(matches!(
            validate_submission(&data, &req),
            Err(AppError::MissingField(_))
        ));
    }

    #[test]
    fn test_budget_is_checked_before_required_fields() {
        let data = fixture_reference();
        let req = submission(&data, "", [10, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            validate_submission(&data, &req),
            Err(AppError::Budget { .. })
        ));
    }

    #[test]
    fn test_job_title_must_belong_to_area() {
        let data = fixture_reference();
        let mut req = submission(&data, "Ana López", [50, 50, 0, 0, 0, 0, 0, 0]);
        req.area = Some("Tecnología".to_string());
        req.job_title = Some("Analista".to_string());
        assert!(matches!(
            validate_submission(&data, &req),
            Err(AppError::UnknownSelection(_))
        ));
    }
}
