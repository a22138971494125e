use crate::models::PlantingRecord;
use std::collections::BTreeMap;

/// Most recent year each family was planted, keyed by family id.
///
/// Plantings without a family are skipped.
pub fn last_year_by_family(history: &[PlantingRecord]) -> BTreeMap<&str, i32> {
    let mut latest: BTreeMap<&str, i32> = BTreeMap::new();

    for record in history {
        let Some(family_id) = record.family_id.as_deref() else {
            continue;
        };
        latest
            .entry(family_id)
            .and_modify(|year| *year = (*year).max(record.year))
            .or_insert(record.year);
    }

    latest
}

/// Plantings in `[target_year - years, target_year)`.
pub fn window(history: &[PlantingRecord], target_year: i32, years: i32) -> Vec<&PlantingRecord> {
    history
        .iter()
        .filter(|r| r.year >= target_year.saturating_sub(years) && r.year < target_year)
        .collect()
}
