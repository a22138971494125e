use super::history::last_year_by_family;
use crate::config::RotationSettings;
use crate::models::{
    BlockedFamily, FamilyReference, PlantingRecord, RecommendedFamily, SoilAnalysis,
};
use std::collections::HashSet;

/// Rank the families that may go on the plot this year
///
/// 1. Depleted nitrogen puts the nitrogen-fixing family first (fixed score).
/// 2. Every other allowed family scores by years since it last grew here,
///    15 points per year up to 100. Families never grown score a flat 80.
/// 3. On nitrogen-rich soil, heavy-feeder families get a bonus.
///
/// Blocked families are never scored. Output is sorted by score, then id.
pub fn recommend_families(
    history: &[PlantingRecord],
    families: &[FamilyReference],
    blocked: &[BlockedFamily],
    soil: &SoilAnalysis,
    target_year: i32,
    settings: &RotationSettings,
) -> Vec<RecommendedFamily> {
    let blocked_ids: HashSet<&str> = blocked.iter().map(|b| b.family_id.as_str()).collect();
    let last_used = last_year_by_family(history);

    let mut scored: HashSet<&str> = HashSet::new();
    let mut recommendations: Vec<RecommendedFamily> = Vec::new();

    let fixer = settings.nitrogen_fixing_family.as_str();
    if soil.nitrogen_depleted() && !blocked_ids.contains(fixer) {
        recommendations.push(RecommendedFamily {
            family_id: fixer.to_string(),
            reason: "Nitrogen-fixing legumes restore depleted soil".to_string(),
            score: settings.nitrogen_fixer_score,
        });
        scored.insert(fixer);
    }

    for family in families {
        let family_id = family.id.as_str();
        if blocked_ids.contains(family_id) || !scored.insert(family_id) {
            continue;
        }

        let (mut score, mut reason) = match last_used.get(family_id) {
            None => (
                settings.never_used_score,
                "Never used on this plot".to_string(),
            ),
            Some(&last_year) => {
                let years_since = (i64::from(target_year) - i64::from(last_year)).max(0);
                let score = years_since
                    .saturating_mul(i64::from(settings.score_per_year))
                    .min(100) as u8;
                let reason = if years_since < i64::from(settings.exact_year_reason_below) {
                    format!("Last grown here in {}", last_year)
                } else {
                    format!("Not grown here for {} years", years_since)
                };
                (score, reason)
            }
        };

        if soil.nitrogen_enriched() && settings.is_heavy_feeder_family(family_id) {
            score = score.saturating_add(settings.enriched_bonus).min(100);
            reason.push_str(" - soil rich in nitrogen, ideal for this family");
        }

        recommendations.push(RecommendedFamily {
            family_id: family_id.to_string(),
            reason,
            score,
        });
    }

    recommendations.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.family_id.cmp(&b.family_id))
    });

    tracing::debug!(
        count = recommendations.len(),
        target_year,
        "Ranked candidate families"
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientLevel;

    fn catalogue() -> Vec<FamilyReference> {
        vec![
            FamilyReference::new("Solanaceae", 4),
            FamilyReference::new("Fabacées", 2),
            FamilyReference::new("Cucurbitaceae", 3),
            FamilyReference::new("Apiaceae", 3),
        ]
    }

    fn soil(n: NutrientLevel) -> SoilAnalysis {
        SoilAnalysis {
            estimated_n: n,
            ..SoilAnalysis::neutral("test")
        }
    }

    fn find<'a>(recs: &'a [RecommendedFamily], id: &str) -> &'a RecommendedFamily {
        recs.iter().find(|r| r.family_id == id).unwrap()
    }

    #[test]
    fn never_used_scores_flat_eighty() {
        let recs = recommend_families(
            &[],
            &catalogue(),
            &[],
            &soil(NutrientLevel::Normal),
            2023,
            &RotationSettings::default(),
        );

        assert_eq!(recs.len(), 4);
        for rec in &recs {
            assert_eq!(rec.score, 80);
            assert_eq!(rec.reason, "Never used on this plot");
        }
        // Equal scores fall back to id order
        let ids: Vec<&str> = recs.iter().map(|r| r.family_id.as_str()).collect();
        assert_eq!(ids, vec!["Apiaceae", "Cucurbitaceae", "Fabacées", "Solanaceae"]);
    }

    #[test]
    fn score_grows_fifteen_per_year_and_caps() {
        let history = vec![
            PlantingRecord::new(2021, "carrot").with_family("Apiaceae"),
            PlantingRecord::new(2015, "tomato").with_family("Solanaceae"),
        ];
        let recs = recommend_families(
            &history,
            &catalogue(),
            &[],
            &soil(NutrientLevel::Normal),
            2023,
            &RotationSettings::default(),
        );

        let apiaceae = find(&recs, "Apiaceae");
        assert_eq!(apiaceae.score, 30);
        assert_eq!(apiaceae.reason, "Last grown here in 2021");

        let solanaceae = find(&recs, "Solanaceae");
        assert_eq!(solanaceae.score, 100);
        assert_eq!(solanaceae.reason, "Not grown here for 8 years");
    }

    #[test]
    fn reason_switches_to_year_count_at_five_years() {
        let history = vec![
            PlantingRecord::new(2019, "carrot").with_family("Apiaceae"),
            PlantingRecord::new(2018, "squash").with_family("Cucurbitaceae"),
        ];
        let recs = recommend_families(
            &history,
            &catalogue(),
            &[],
            &soil(NutrientLevel::Normal),
            2023,
            &RotationSettings::default(),
        );

        let four_years = find(&recs, "Apiaceae");
        assert_eq!(four_years.score, 60);
        assert_eq!(four_years.reason, "Last grown here in 2019");

        let five_years = find(&recs, "Cucurbitaceae");
        assert_eq!(five_years.score, 75);
        assert_eq!(five_years.reason, "Not grown here for 5 years");
    }

    #[test]
    fn depleted_soil_puts_legumes_first() {
        let recs = recommend_families(
            &[],
            &catalogue(),
            &[],
            &soil(NutrientLevel::Depleted),
            2023,
            &RotationSettings::default(),
        );

        assert_eq!(recs[0].family_id, "Fabacées");
        assert_eq!(recs[0].score, 95);
        assert!(recs[0].reason.contains("Nitrogen-fixing"));
        assert_eq!(recs.iter().filter(|r| r.family_id == "Fabacées").count(), 1);
    }

    #[test]
    fn blocked_legumes_not_forced() {
        let blocked = vec![BlockedFamily {
            family_id: "Fabacées".into(),
            last_year: 2022,
            min_interval_years: 2,
            years_remaining: 1,
            reason: String::new(),
        }];
        let recs = recommend_families(
            &[PlantingRecord::new(2022, "bean").with_family("Fabacées")],
            &catalogue(),
            &blocked,
            &soil(NutrientLevel::Depleted),
            2023,
            &RotationSettings::default(),
        );

        assert!(recs.iter().all(|r| r.family_id != "Fabacées"));
    }

    #[test]
    fn legumes_forced_even_when_missing_from_catalogue() {
        let families = vec![FamilyReference::new("Solanaceae", 4)];
        let recs = recommend_families(
            &[],
            &families,
            &[],
            &soil(NutrientLevel::Depleted),
            2023,
            &RotationSettings::default(),
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].family_id, "Fabacées");
    }

    #[test]
    fn enriched_soil_boosts_heavy_feeders() {
        let history = vec![PlantingRecord::new(2020, "squash").with_family("Cucurbitaceae")];
        let recs = recommend_families(
            &history,
            &catalogue(),
            &[],
            &soil(NutrientLevel::Enriched),
            2023,
            &RotationSettings::default(),
        );

        let cucurbits = find(&recs, "Cucurbitaceae");
        assert_eq!(cucurbits.score, 55);
        assert!(cucurbits.reason.starts_with("Last grown here in 2020"));
        assert!(cucurbits.reason.contains("soil rich"));

        // Never-used override happens before the bonus
        let solanaceae = find(&recs, "Solanaceae");
        assert_eq!(solanaceae.score, 90);

        let apiaceae = find(&recs, "Apiaceae");
        assert_eq!(apiaceae.score, 80);
        assert!(!apiaceae.reason.contains("soil rich"));
    }

    #[test]
    fn bonus_capped_at_hundred() {
        let history = vec![PlantingRecord::new(2010, "tomato").with_family("Solanaceae")];
        let recs = recommend_families(
            &history,
            &catalogue(),
            &[],
            &soil(NutrientLevel::Enriched),
            2023,
            &RotationSettings::default(),
        );
        assert_eq!(find(&recs, "Solanaceae").score, 100);
    }

    #[test]
    fn future_plantings_do_not_go_negative() {
        let history = vec![PlantingRecord::new(2025, "carrot").with_family("Apiaceae")];
        let recs = recommend_families(
            &history,
            &catalogue(),
            &[],
            &soil(NutrientLevel::Normal),
            2023,
            &RotationSettings::default(),
        );
        let apiaceae = find(&recs, "Apiaceae");
        assert_eq!(apiaceae.score, 0);
        assert_eq!(apiaceae.reason, "Last grown here in 2025");
    }
}
