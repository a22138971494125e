use super::history::window;
use crate::config::RotationSettings;
use crate::models::{HeavyFeeder, NutrientLevel, PlantingRecord, SoilAnalysis};

/// Soil nutrient estimate
///
/// Averages the N/P/K needs of the crops grown over the lookback window
/// (target year excluded). Hungry crops in a row leave the soil depleted,
/// light feeders and legumes leave it enriched.
///
/// Thresholds (0-5 scale, missing needs count as the neutral value):
/// - average > 4: depleted
/// - average < 2: enriched
pub fn estimate_soil(
    history: &[PlantingRecord],
    target_year: i32,
    settings: &RotationSettings,
) -> SoilAnalysis {
    let recent = window(history, target_year, settings.soil_lookback_years);

    if recent.is_empty() {
        tracing::debug!("No plantings in lookback window, assuming balanced soil");
        return SoilAnalysis::neutral(format!(
            "No planting history over the last {} years: soil assumed balanced, any family can be considered.",
            settings.soil_lookback_years
        ));
    }

    let neutral = settings.neutral_need;
    let avg_n = average_need(&recent, neutral, |r| r.nitrogen_need);
    let avg_p = average_need(&recent, neutral, |r| r.phosphorus_need);
    let avg_k = average_need(&recent, neutral, |r| r.potassium_need);

    let estimated_n = classify(avg_n, settings);

    // Strictly greater keeps the earliest listed planting on equal years
    let mut last_heavy_feeder: Option<&PlantingRecord> = None;
    for record in recent
        .iter()
        .filter(|r| r.nitrogen_need.is_some_and(|n| n >= settings.heavy_feeder_need))
    {
        if last_heavy_feeder.map_or(true, |best| record.year > best.year) {
            last_heavy_feeder = Some(*record);
        }
    }

    tracing::debug!(
        plantings = recent.len(),
        avg_n,
        avg_p,
        avg_k,
        "Estimated soil status"
    );

    SoilAnalysis {
        estimated_n,
        estimated_p: classify(avg_p, settings),
        estimated_k: classify(avg_k, settings),
        last_heavy_feeder: last_heavy_feeder.map(|r| HeavyFeeder {
            year: r.year,
            species_id: r.species_id.clone(),
        }),
        suggestion: suggestion_for(estimated_n, settings),
    }
}

fn average_need(
    records: &[&PlantingRecord],
    neutral: u8,
    need: impl Fn(&PlantingRecord) -> Option<u8>,
) -> f64 {
    records
        .iter()
        .map(|r| need(*r).unwrap_or(neutral) as f64)
        .sum::<f64>()
        / records.len() as f64
}

fn classify(average: f64, settings: &RotationSettings) -> NutrientLevel {
    if average > settings.depleted_threshold {
        NutrientLevel::Depleted
    } else if average < settings.enriched_threshold {
        NutrientLevel::Enriched
    } else {
        NutrientLevel::Normal
    }
}

fn suggestion_for(nitrogen: NutrientLevel, settings: &RotationSettings) -> String {
    match nitrogen {
        NutrientLevel::Depleted => format!(
            "Nitrogen likely depleted by recent heavy feeders: plant legumes ({}) to restore it.",
            settings.nitrogen_fixing_family
        ),
        NutrientLevel::Enriched => {
            "Soil rich in nitrogen: ideal for heavy feeders such as tomatoes, squash or cabbages."
                .to_string()
        }
        NutrientLevel::Normal => {
            "Balanced soil: continue a varied rotation.".to_string()
        }
    }
}
