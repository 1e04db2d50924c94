//! Behavior statements per competency and the 1–5 ratings collected for them.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::reference::models::{BehaviorReferenceTable, CompetencySet};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const DEFAULT_RATING: u8 = 3;

/// Appended to every behavior column of the exported record.
pub const BEHAVIOR_COLUMN_SUFFIX: &str = " (comportamiento)";

static ENUMERATION_PREFIX: OnceLock<Regex> = OnceLock::new();

fn enumeration_prefix() -> &'static Regex {
    // "1. ", "2.3. ", "a. ", "IV. "
    ENUMERATION_PREFIX
        .get_or_init(|| Regex::new(r"^\s*(?:(?:\d+|[A-Za-z]|[IVXivx]{1,4})\.\s*)+").unwrap())
}

/// Strips the leading enumeration ("1.", "b.", "IV.") and trims.
///
/// A run of tokens is stripped as one prefix: "2.3. Delega" and "1. a. Delega"
/// both become "Delega", not "3. Delega" or "a. Delega". That keeps cleaning
/// twice the same as cleaning once. A statement that is nothing but a prefix
/// is kept whole.
pub fn clean_statement(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = enumeration_prefix().replace(trimmed, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        trimmed.to_string()
    } else {
        stripped.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorItem {
    /// Cleaned statement, used for display and as the rating key.
    pub statement: String,
    /// Column header in the exported record.
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorGroup {
    pub competency: String,
    pub items: Vec<BehaviorItem>,
}

/// Groups cleaned statements under each competency of the set, in set order.
///
/// Competencies with no statements get an empty group. A statement repeated
/// under one competency appears once. When the same cleaned text is listed
/// under several competencies, its export column names the competency so the
/// ratings stay distinct.
pub fn group_behaviors(set: &CompetencySet, table: &BehaviorReferenceTable) -> Vec<BehaviorGroup> {
    let groups: Vec<(String, Vec<String>)> = set
        .names()
        .iter()
        .map(|competency| {
            let mut statements: Vec<String> = Vec::new();
            for raw in table.statements_for(competency) {
                let clean = clean_statement(raw);
                if !statements.contains(&clean) {
                    statements.push(clean);
                }
            }
            (competency.clone(), statements)
        })
        .collect();

    let mut owners: HashMap<&str, usize> = HashMap::new();
    for (_, statements) in &groups {
        for s in statements {
            *owners.entry(s.as_str()).or_default() += 1;
        }
    }
    let shared: Vec<String> = owners
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(s, _)| s.to_string())
        .collect();

    groups
        .into_iter()
        .map(|(competency, statements)| {
            let items = statements
                .into_iter()
                .map(|statement| {
                    let column = if shared.contains(&statement) {
                        format!("{statement} [{competency}]{BEHAVIOR_COLUMN_SUFFIX}")
                    } else {
                        format!("{statement}{BEHAVIOR_COLUMN_SUFFIX}")
                    };
                    BehaviorItem { statement, column }
                })
                .collect();
            BehaviorGroup { competency, items }
        })
        .collect()
}

/// A rating as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorRatingInput {
    pub competency: String,
    pub statement: String,
    pub rating: i64,
}

/// Ratings for every behavior item, parallel to the behavior groups.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorRatings {
    ratings: Vec<Vec<u8>>,
}

impl BehaviorRatings {
    /// Every item starts at `DEFAULT_RATING`.
    pub fn defaults(groups: &[BehaviorGroup]) -> Self {
        Self {
            ratings: groups
                .iter()
                .map(|g| vec![DEFAULT_RATING; g.items.len()])
                .collect(),
        }
    }

    /// Applies submitted ratings over the defaults. Unknown items and ratings
    /// outside 1–5 are rejected; a repeated item keeps the last rating.
    pub fn collect(groups: &[BehaviorGroup], input: &[BehaviorRatingInput]) -> Result<Self, AppError> {
        let mut collected = Self::defaults(groups);

        for entry in input {
            let rating = u8::try_from(entry.rating)
                .ok()
                .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "rating for '{}' must be between {MIN_RATING} and {MAX_RATING}, got {}",
                        entry.statement, entry.rating
                    ))
                })?;

            let statement = clean_statement(&entry.statement);
            let position = groups
                .iter()
                .position(|g| g.competency == entry.competency)
                .and_then(|gi| {
                    groups[gi]
                        .items
                        .iter()
                        .position(|item| item.statement == statement)
                        .map(|ii| (gi, ii))
                });

            let Some((gi, ii)) = position else {
                return Err(AppError::Validation(format!(
                    "unknown behavior '{}' for competency '{}'",
                    entry.statement, entry.competency
                )));
            };
            collected.ratings[gi][ii] = rating;
        }

        Ok(collected)
    }

    /// Items paired with their ratings, in group order then table order.
    pub fn iter<'a>(
        &'a self,
        groups: &'a [BehaviorGroup],
    ) -> impl Iterator<Item = (&'a BehaviorItem, u8)> + 'a {
        groups
            .iter()
            .zip(&self.ratings)
            .flat_map(|(g, r)| g.items.iter().zip(r.iter().copied()))
    }
}
