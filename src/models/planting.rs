use crate::error::{Result, RotationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound of the 0-5 nutrient need scale.
pub const MAX_NUTRIENT_NEED: u8 = 5;

/// Latest calendar year accepted for plantings and target years.
pub const MAX_YEAR: i32 = 9999;

/// Longest rotation interval accepted for a family.
pub const MAX_INTERVAL_YEARS: u32 = 100;

/// One crop that occupied the plot during a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingRecord {
    pub year: i32,
    pub species_id: String,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub nitrogen_need: Option<u8>,
    #[serde(default)]
    pub phosphorus_need: Option<u8>,
    #[serde(default)]
    pub potassium_need: Option<u8>,
}

impl PlantingRecord {
    pub fn new(year: i32, species_id: impl Into<String>) -> Self {
        Self {
            year,
            species_id: species_id.into(),
            family_id: None,
            nitrogen_need: None,
            phosphorus_need: None,
            potassium_need: None,
        }
    }

    pub fn with_family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    pub fn with_needs(mut self, nitrogen: u8, phosphorus: u8, potassium: u8) -> Self {
        self.nitrogen_need = Some(nitrogen);
        self.phosphorus_need = Some(phosphorus);
        self.potassium_need = Some(potassium);
        self
    }

    pub fn with_nitrogen(mut self, nitrogen: u8) -> Self {
        self.nitrogen_need = Some(nitrogen);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_YEAR).contains(&self.year) {
            return Err(RotationError::InvalidData(format!(
                "Planting of '{}' has year {} outside 0-{}",
                self.species_id, self.year, MAX_YEAR
            )));
        }
        if self.species_id.trim().is_empty() {
            return Err(RotationError::InvalidData(format!(
                "Planting in {} has an empty species id",
                self.year
            )));
        }
        for (label, need) in [
            ("nitrogen", self.nitrogen_need),
            ("phosphorus", self.phosphorus_need),
            ("potassium", self.potassium_need),
        ] {
            check_need(label, need, &self.species_id)?;
        }
        Ok(())
    }
}

/// Catalogue entry for a botanical family and its mandatory rest period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyReference {
    pub id: String,
    pub min_interval_years: u32,
    #[serde(default)]
    pub color_hint: Option<String>,
}

impl FamilyReference {
    pub fn new(id: impl Into<String>, min_interval_years: u32) -> Self {
        Self {
            id: id.into(),
            min_interval_years,
            color_hint: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_hint = Some(color.into());
        self
    }
}

/// Species the caller is considering for the target year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSpecies {
    pub species_id: String,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub nitrogen_need: Option<u8>,
}

impl CandidateSpecies {
    pub fn new(species_id: impl Into<String>) -> Self {
        Self {
            species_id: species_id.into(),
            family_id: None,
            nitrogen_need: None,
        }
    }

    pub fn with_family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    pub fn with_nitrogen(mut self, nitrogen: u8) -> Self {
        self.nitrogen_need = Some(nitrogen);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.species_id.trim().is_empty() {
            return Err(RotationError::InvalidData(
                "Candidate species has an empty id".into(),
            ));
        }
        check_need("nitrogen", self.nitrogen_need, &self.species_id)
    }
}

fn check_need(label: &str, need: Option<u8>, species_id: &str) -> Result<()> {
    match need {
        Some(n) if n > MAX_NUTRIENT_NEED => Err(RotationError::InvalidData(format!(
            "'{}' has {} need {} outside 0-{}",
            species_id, label, n, MAX_NUTRIENT_NEED
        ))),
        _ => Ok(()),
    }
}

/// Reject structurally invalid input before any scoring happens.
pub fn validate_inputs(
    target_year: i32,
    history: &[PlantingRecord],
    families: &[FamilyReference],
    candidate: Option<&CandidateSpecies>,
) -> Result<()> {
    if !(0..=MAX_YEAR).contains(&target_year) {
        return Err(RotationError::InvalidData(format!(
            "Target year {} is outside 0-{}",
            target_year, MAX_YEAR
        )));
    }

    for record in history {
        record.validate()?;
    }

    let mut seen = HashSet::new();
    for family in families {
        if family.id.trim().is_empty() {
            return Err(RotationError::InvalidData(
                "Family catalogue contains an empty id".into(),
            ));
        }
        if family.min_interval_years > MAX_INTERVAL_YEARS {
            return Err(RotationError::InvalidData(format!(
                "Family '{}' has interval {} above {} years",
                family.id, family.min_interval_years, MAX_INTERVAL_YEARS
            )));
        }
        if !seen.insert(family.id.as_str()) {
            return Err(RotationError::InvalidData(format!(
                "Family '{}' is listed twice in the catalogue",
                family.id
            )));
        }
    }

    if let Some(candidate) = candidate {
        candidate.validate()?;
    }

    Ok(())
}
