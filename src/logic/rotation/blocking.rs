use super::history::last_year_by_family;
use crate::config::RotationSettings;
use crate::models::{BlockedFamily, FamilyReference, PlantingRecord};
use std::collections::HashMap;

/// Families still resting on the plot
///
/// A family planted in year Y with interval I may not return before Y + I.
/// Families missing from the catalogue use the fallback interval.
///
/// Results are ordered by years remaining (most restricted first), then by
/// family id.
pub fn blocked_families(
    history: &[PlantingRecord],
    families: &[FamilyReference],
    target_year: i32,
    settings: &RotationSettings,
) -> Vec<BlockedFamily> {
    let intervals: HashMap<&str, u32> = families
        .iter()
        .map(|f| (f.id.as_str(), f.min_interval_years))
        .collect();

    let mut blocked: Vec<BlockedFamily> = last_year_by_family(history)
        .into_iter()
        .filter_map(|(family_id, last_year)| {
            let min_interval_years = match intervals.get(family_id) {
                Some(interval) => *interval,
                None => {
                    tracing::warn!(
                        "Family '{}' not in catalogue, using {}-year fallback interval",
                        family_id,
                        settings.fallback_interval_years
                    );
                    settings.fallback_interval_years
                }
            };

            let eligible_year = i64::from(last_year) + i64::from(min_interval_years);
            let years_remaining = eligible_year - i64::from(target_year);
            if years_remaining <= 0 {
                return None;
            }

            Some(BlockedFamily {
                family_id: family_id.to_string(),
                last_year,
                min_interval_years,
                years_remaining,
                reason: format!(
                    "{} planted in {}, wait until {} ({}-year rotation)",
                    family_id, last_year, eligible_year, min_interval_years
                ),
            })
        })
        .collect();

    blocked.sort_by(|a, b| {
        b.years_remaining
            .cmp(&a.years_remaining)
            .then_with(|| a.family_id.cmp(&b.family_id))
    });

    tracing::debug!(count = blocked.len(), target_year, "Computed blocked families");
    blocked
}
