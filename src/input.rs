use crate::error::{Result, RotationError};
use crate::logic::AdvisoryRequest;
use crate::models::{CandidateSpecies, FamilyReference, PlantingRecord};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plot export as written by the surrounding garden application.
///
/// `.json` files are parsed as JSON, anything else as YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryDocument {
    pub plot_id: String,
    #[serde(default)]
    pub target_year: Option<i32>,
    #[serde(default)]
    pub history: Vec<PlantingRecord>,
    #[serde(default)]
    pub families: Vec<FamilyReference>,
    #[serde(default)]
    pub candidate: Option<CandidateSpecies>,
}

impl AdvisoryDocument {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RotationError::InvalidData(format!(
                "Input file not found at {:?}",
                path
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let document = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        tracing::debug!(
            plot = %document.plot_id,
            plantings = document.history.len(),
            families = document.families.len(),
            "Loaded advisory input from {}",
            path.display()
        );
        Ok(document)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolve the target year: explicit override, then the document, then
    /// the current calendar year.
    pub fn into_request(self, year_override: Option<i32>) -> AdvisoryRequest {
        let target_year = year_override
            .or(self.target_year)
            .unwrap_or_else(|| Local::now().date_naive().year());

        AdvisoryRequest {
            plot_id: self.plot_id,
            target_year,
            history: self.history,
            families: self.families,
            candidate: self.candidate,
        }
    }
}
