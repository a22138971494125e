use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientLevel {
    Depleted,
    Normal,
    Enriched,
}

impl NutrientLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientLevel::Depleted => "depleted",
            NutrientLevel::Normal => "normal",
            NutrientLevel::Enriched => "enriched",
        }
    }
}

impl std::fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Most recent high-nitrogen crop inside the lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeavyFeeder {
    pub year: i32,
    pub species_id: String,
}

/// Heuristic estimate of recent nutrient drawdown on a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    #[serde(rename = "estimatedN")]
    pub estimated_n: NutrientLevel,
    #[serde(rename = "estimatedP")]
    pub estimated_p: NutrientLevel,
    #[serde(rename = "estimatedK")]
    pub estimated_k: NutrientLevel,
    pub last_heavy_feeder: Option<HeavyFeeder>,
    pub suggestion: String,
}

impl SoilAnalysis {
    pub fn neutral(suggestion: impl Into<String>) -> Self {
        Self {
            estimated_n: NutrientLevel::Normal,
            estimated_p: NutrientLevel::Normal,
            estimated_k: NutrientLevel::Normal,
            last_heavy_feeder: None,
            suggestion: suggestion.into(),
        }
    }

    pub fn nitrogen_depleted(&self) -> bool {
        self.estimated_n == NutrientLevel::Depleted
    }

    pub fn nitrogen_enriched(&self) -> bool {
        self.estimated_n == NutrientLevel::Enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrient_level_display() {
        assert_eq!(NutrientLevel::Depleted.to_string(), "depleted");
        assert_eq!(NutrientLevel::Normal.to_string(), "normal");
        assert_eq!(NutrientLevel::Enriched.to_string(), "enriched");
    }

    #[test]
    fn serializes_with_single_letter_nutrient_keys() {
        let analysis = SoilAnalysis::neutral("none");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["estimatedN"], "normal");
        assert_eq!(json["estimatedP"], "normal");
        assert_eq!(json["estimatedK"], "normal");
        assert!(json["lastHeavyFeeder"].is_null());
    }
}
