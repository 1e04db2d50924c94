use std::collections::BTreeSet;

use crate::reference::models::CompetencyReferenceTable;

/// Distinct areas, case-sensitive, sorted for display.
pub fn areas(table: &CompetencyReferenceTable) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|r| r.area.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct job titles of `area`, sorted. Unknown areas yield an empty list.
pub fn job_titles(table: &CompetencyReferenceTable, area: &str) -> Vec<String> {
    table
        .rows
        .iter()
        .filter(|r| r.area == area)
        .map(|r| r.job_title.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// True when `job_title` is one of the titles listed under `area`.
pub fn is_valid_selection(table: &CompetencyReferenceTable, area: &str, job_title: &str) -> bool {
    table
        .rows
        .iter()
        .any(|r| r.area == area && r.job_title == job_title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_reference;

    #[test]
    fn test_areas_are_distinct_and_sorted() {
        let data = fixture_reference();
        assert_eq!(
            areas(&data.competencies),
            vec!["Finanzas", "Recursos Humanos", "Tecnología"]
        );
    }

    #[test]
    fn test_job_titles_scoped_to_area() {
        let data = fixture_reference();
        assert_eq!(
            job_titles(&data.competencies, "Tecnología"),
            vec!["Arquitecto", "Desarrollador"]
        );
    }

    #[test]
    fn test_unknown_area_yields_empty_list() {
        let data = fixture_reference();
        assert!(job_titles(&data.competencies, "Marketing").is_empty());
        assert!(job_titles(&data.competencies, "tecnología").is_empty());
    }

    #[test]
    fn test_selection_must_belong_to_area() {
        let data = fixture_reference();
        assert!(is_valid_selection(&data.competencies, "Finanzas", "Analista"));
        assert!(!is_valid_selection(&data.competencies, "Tecnología", "Analista"));
    }
}
