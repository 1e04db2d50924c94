use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::reference::loader::CompetencyColumns;

/// Application configuration loaded from environment variables.
/// Every setting has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub reference_workbook: PathBuf,
    pub output_dir: PathBuf,
    pub competency_columns: CompetencyColumns,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            reference_workbook: std::env::var("REFERENCE_WORKBOOK")
                .unwrap_or_else(|_| "Valoracion_Jobs.xlsx".to_string())
                .into(),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            competency_columns: parse_competency_columns(
                std::env::var("COMPETENCY_COLUMNS").ok().as_deref(),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Comma-separated competency names; unset or blank keeps the positional layout.
fn parse_competency_columns(raw: Option<&str>) -> CompetencyColumns {
    let names: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        CompetencyColumns::Positional
    } else {
        CompetencyColumns::Named(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_columns_use_positional_layout() {
        assert_eq!(parse_competency_columns(None), CompetencyColumns::Positional);
        assert_eq!(
            parse_competency_columns(Some(" , ")),
            CompetencyColumns::Positional
        );
    }

    #[test]
    fn test_columns_are_split_and_trimmed() {
        assert_eq!(
            parse_competency_columns(Some("Liderazgo, Comunicación ,Innovación")),
            CompetencyColumns::Named(vec![
                "Liderazgo".to_string(),
                "Comunicación".to_string(),
                "Innovación".to_string(),
            ])
        );
    }
}
