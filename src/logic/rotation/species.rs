use super::SpeciesRule;
use crate::config::RotationSettings;
use crate::models::{AdviceStatus, BlockedFamily, CandidateSpecies, SoilAnalysis, SpeciesAdvice};

/// Candidate belongs to a family still in its rest interval.
pub struct BlockedFamilyRule;

impl SpeciesRule for BlockedFamilyRule {
    fn id(&self) -> &'static str {
        "blocked_family"
    }

    fn name(&self) -> &'static str {
        "Rotation Interval"
    }

    fn evaluate(
        &self,
        candidate: &CandidateSpecies,
        blocked: &[BlockedFamily],
        _soil: &SoilAnalysis,
        _settings: &RotationSettings,
    ) -> Option<SpeciesAdvice> {
        let family_id = candidate.family_id.as_deref()?;
        let entry = blocked.iter().find(|b| b.family_id == family_id)?;

        Some(
            SpeciesAdvice::new(
                &candidate.species_id,
                Some(family_id.to_string()),
                AdviceStatus::Blocked,
                format!("Family {} cannot return to this plot yet", family_id),
            )
            .with_detail(format!("Last grown in {}", entry.last_year))
            .with_detail(format!(
                "Required interval: {} years",
                entry.min_interval_years
            ))
            .with_detail(format!("Eligible again from {}", entry.eligible_year())),
        )
    }
}

/// Heavy feeder proposed on nitrogen-depleted soil.
pub struct DepletedSoilRule;

impl SpeciesRule for DepletedSoilRule {
    fn id(&self) -> &'static str {
        "depleted_soil"
    }

    fn name(&self) -> &'static str {
        "Heavy Feeder on Depleted Soil"
    }

    fn evaluate(
        &self,
        candidate: &CandidateSpecies,
        _blocked: &[BlockedFamily],
        soil: &SoilAnalysis,
        settings: &RotationSettings,
    ) -> Option<SpeciesAdvice> {
        let need = candidate.nitrogen_need.unwrap_or(settings.neutral_need);
        if need < settings.heavy_feeder_need || !soil.nitrogen_depleted() {
            return None;
        }

        Some(
            SpeciesAdvice::new(
                &candidate.species_id,
                candidate.family_id.clone(),
                AdviceStatus::Warning,
                format!(
                    "{} is a heavy feeder and the soil looks depleted in nitrogen",
                    candidate.species_id
                ),
            )
            .with_detail("Fertilize with compost or manure before planting")
            .with_detail(format!(
                "Or grow a legume cover crop ({}) first",
                settings.nitrogen_fixing_family
            )),
        )
    }
}

/// Advice when no guard rule fired.
pub fn safe_advice(
    candidate: &CandidateSpecies,
    soil: &SoilAnalysis,
    settings: &RotationSettings,
) -> SpeciesAdvice {
    let mut advice = SpeciesAdvice::new(
        &candidate.species_id,
        candidate.family_id.clone(),
        AdviceStatus::Safe,
        format!("{} can be planted on this plot", candidate.species_id),
    )
    .with_detail("Rotation respected");

    if let Some(family_id) = &candidate.family_id {
        advice = advice.with_detail(format!("Family: {}", family_id));
    }

    let need = candidate.nitrogen_need.unwrap_or(settings.neutral_need);
    if soil.nitrogen_enriched() && need >= settings.heavy_feeder_need {
        advice = advice.with_detail("Soil rich in nitrogen - ideal conditions");
    }

    advice
}
