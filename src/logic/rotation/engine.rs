use super::{
    blocking::blocked_families,
    recommend::recommend_families,
    soil::estimate_soil,
    species::{safe_advice, BlockedFamilyRule, DepletedSoilRule},
    SpeciesRule,
};
use crate::config::RotationSettings;
use crate::error::Result;
use crate::models::{
    validate_inputs, BlockedFamily, CandidateSpecies, FamilyReference, PlantingRecord,
    RecentPlanting, RotationAdvice, SoilAnalysis, SpeciesAdvice,
};
use serde::{Deserialize, Serialize};

/// Everything needed to advise one plot for one season.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub plot_id: String,
    pub target_year: i32,
    #[serde(default)]
    pub history: Vec<PlantingRecord>,
    #[serde(default)]
    pub families: Vec<FamilyReference>,
    #[serde(default)]
    pub candidate: Option<CandidateSpecies>,
}

impl AdvisoryRequest {
    pub fn new(plot_id: impl Into<String>, target_year: i32) -> Self {
        Self {
            plot_id: plot_id.into(),
            target_year,
            history: Vec::new(),
            families: Vec::new(),
            candidate: None,
        }
    }

    pub fn with_history(mut self, history: Vec<PlantingRecord>) -> Self {
        self.history = history;
        self
    }

    pub fn with_families(mut self, families: Vec<FamilyReference>) -> Self {
        self.families = families;
        self
    }

    pub fn with_candidate(mut self, candidate: CandidateSpecies) -> Self {
        self.candidate = Some(candidate);
        self
    }
}

pub struct RotationEngine {
    settings: RotationSettings,
    species_rules: Vec<Box<dyn SpeciesRule>>,
}

impl RotationEngine {
    pub fn new() -> Self {
        Self::with_settings(RotationSettings::default())
    }

    pub fn with_settings(settings: RotationSettings) -> Self {
        // Order matters: a blocked family outranks a soil warning
        let species_rules: Vec<Box<dyn SpeciesRule>> =
            vec![Box::new(BlockedFamilyRule), Box::new(DepletedSoilRule)];

        Self {
            settings,
            species_rules,
        }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    /// Build the full rotation advice for a plot and target year.
    ///
    /// Fails only when the request is structurally invalid.
    pub fn advise(&self, request: &AdvisoryRequest) -> Result<RotationAdvice> {
        validate_inputs(
            request.target_year,
            &request.history,
            &request.families,
            request.candidate.as_ref(),
        )?;

        let target_year = request.target_year;
        let soil_analysis = estimate_soil(&request.history, target_year, &self.settings);
        let blocked = blocked_families(
            &request.history,
            &request.families,
            target_year,
            &self.settings,
        );
        let recommended = recommend_families(
            &request.history,
            &request.families,
            &blocked,
            &soil_analysis,
            target_year,
            &self.settings,
        );
        let species_advice = request
            .candidate
            .as_ref()
            .map(|c| self.evaluate_species(c, &blocked, &soil_analysis));

        tracing::debug!(
            plot = %request.plot_id,
            target_year,
            blocked = blocked.len(),
            recommended = recommended.len(),
            nitrogen = %soil_analysis.estimated_n,
            "Rotation advice ready"
        );

        Ok(RotationAdvice {
            plot_id: request.plot_id.clone(),
            target_year,
            recent_history: self.recent_history(&request.history, target_year),
            blocked_families: blocked,
            recommended_families: recommended,
            soil_analysis,
            species_advice,
        })
    }

    /// Classify a candidate species; the first matching rule wins, otherwise safe.
    pub fn evaluate_species(
        &self,
        candidate: &CandidateSpecies,
        blocked: &[BlockedFamily],
        soil: &SoilAnalysis,
    ) -> SpeciesAdvice {
        let advice = self
            .species_rules
            .iter()
            .find_map(|rule| rule.evaluate(candidate, blocked, soil, &self.settings))
            .unwrap_or_else(|| safe_advice(candidate, soil, &self.settings));

        tracing::debug!(
            species = %candidate.species_id,
            status = %advice.status,
            "Evaluated candidate species"
        );
        advice
    }

    /// Plantings from the recent window, newest first.
    pub fn recent_history(
        &self,
        history: &[PlantingRecord],
        target_year: i32,
    ) -> Vec<RecentPlanting> {
        let mut recent: Vec<RecentPlanting> = history
            .iter()
            .filter(|r| r.year >= target_year.saturating_sub(self.settings.recent_history_years))
            .map(|r| RecentPlanting {
                year: r.year,
                family_id: r.family_id.clone(),
                species_id: r.species_id.clone(),
                nitrogen_need: r.nitrogen_need,
            })
            .collect();

        recent.sort_by(|a, b| b.year.cmp(&a.year));
        recent
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.species_rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RotationError;
    use crate::models::AdviceStatus;

    fn catalogue() -> Vec<FamilyReference> {
        vec![
            FamilyReference::new("Solanaceae", 4),
            FamilyReference::new("Fabacées", 2),
            FamilyReference::new("Brassicaceae", 3),
        ]
    }

    #[test]
    fn species_rules_in_priority_order() {
        let engine = RotationEngine::new();
        assert_eq!(
            engine.list_rules(),
            vec![
                ("blocked_family", "Rotation Interval"),
                ("depleted_soil", "Heavy Feeder on Depleted Soil"),
            ]
        );
    }

    #[test]
    fn blocked_beats_depleted_warning() {
        let history = vec![
            PlantingRecord::new(2020, "tomato").with_family("Solanaceae").with_nitrogen(5),
            PlantingRecord::new(2021, "potato").with_family("Solanaceae").with_nitrogen(5),
            PlantingRecord::new(2022, "cabbage").with_family("Brassicaceae").with_nitrogen(5),
        ];
        let request = AdvisoryRequest::new("bed-1", 2023)
            .with_history(history)
            .with_families(catalogue())
            .with_candidate(
                CandidateSpecies::new("pepper")
                    .with_family("Solanaceae")
                    .with_nitrogen(5),
            );

        let advice = RotationEngine::new().advise(&request).unwrap();
        assert!(advice.soil_analysis.nitrogen_depleted());
        let species = advice.species_advice.unwrap();
        assert_eq!(species.status, AdviceStatus::Blocked);
    }

    #[test]
    fn recent_history_newest_first() {
        let history = vec![
            PlantingRecord::new(2017, "old"),
            PlantingRecord::new(2019, "a").with_family("Solanaceae").with_nitrogen(5),
            PlantingRecord::new(2022, "b"),
            PlantingRecord::new(2018, "c"),
        ];
        let recent = RotationEngine::new().recent_history(&history, 2023);

        let years: Vec<i32> = recent.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 2019, 2018]);
        assert_eq!(recent[1].family_id.as_deref(), Some("Solanaceae"));
        assert_eq!(recent[1].nitrogen_need, Some(5));
    }

    #[test]
    fn no_candidate_no_species_advice() {
        let request = AdvisoryRequest::new("bed-1", 2023).with_families(catalogue());
        let advice = RotationEngine::new().advise(&request).unwrap();
        assert!(advice.species_advice.is_none());
        assert_eq!(advice.plot_id, "bed-1");
    }

    #[test]
    fn invalid_history_rejected() {
        let request = AdvisoryRequest::new("bed-1", 2023)
            .with_history(vec![PlantingRecord::new(-2, "tomato")]);
        let result = RotationEngine::new().advise(&request);
        assert!(matches!(result, Err(RotationError::InvalidData(_))));
    }

    #[test]
    fn oversized_interval_rejected_before_scoring() {
        let request = AdvisoryRequest::new("bed-1", 2023)
            .with_history(vec![
                PlantingRecord::new(2021, "tomato").with_family("Solanaceae")
            ])
            .with_families(vec![FamilyReference::new("Solanaceae", 3_000_000_000)]);
        let result = RotationEngine::new().advise(&request);
        assert!(matches!(result, Err(RotationError::InvalidData(_))));
    }

    #[test]
    fn custom_settings_flow_through() {
        let settings = RotationSettings {
            never_used_score: 60,
            ..Default::default()
        };
        let request = AdvisoryRequest::new("bed-1", 2023).with_families(catalogue());
        let advice = RotationEngine::with_settings(settings).advise(&request).unwrap();
        assert!(advice.recommended_families.iter().all(|r| r.score == 60));
    }
}
