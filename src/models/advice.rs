use super::SoilAnalysis;
use serde::{Deserialize, Serialize};

/// A family still inside its mandatory rest interval for the target year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedFamily {
    pub family_id: String,
    pub last_year: i32,
    pub min_interval_years: u32,
    pub years_remaining: i64,
    pub reason: String,
}

impl BlockedFamily {
    /// First year the family may return to the plot.
    pub fn eligible_year(&self) -> i64 {
        i64::from(self.last_year) + i64::from(self.min_interval_years)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFamily {
    pub family_id: String,
    pub reason: String,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceStatus {
    Safe,
    Warning,
    Blocked,
}

impl AdviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceStatus::Safe => "safe",
            AdviceStatus::Warning => "warning",
            AdviceStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for AdviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesAdvice {
    pub species_id: String,
    pub family_id: Option<String>,
    pub status: AdviceStatus,
    pub message: String,
    pub details: Vec<String>,
}

impl SpeciesAdvice {
    pub fn new(
        species_id: impl Into<String>,
        family_id: Option<String>,
        status: AdviceStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            species_id: species_id.into(),
            family_id,
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Display row for the last few seasons on the plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPlanting {
    pub year: i32,
    pub family_id: Option<String>,
    pub species_id: String,
    pub nitrogen_need: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationAdvice {
    pub plot_id: String,
    pub target_year: i32,
    pub recent_history: Vec<RecentPlanting>,
    pub blocked_families: Vec<BlockedFamily>,
    pub recommended_families: Vec<RecommendedFamily>,
    pub soil_analysis: SoilAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_advice: Option<SpeciesAdvice>,
}

impl RotationAdvice {
    pub fn is_blocked(&self, family_id: &str) -> bool {
        self.blocked_families
            .iter()
            .any(|b| b.family_id == family_id)
    }

    pub fn recommendation(&self, family_id: &str) -> Option<&RecommendedFamily> {
        self.recommended_families
            .iter()
            .find(|r| r.family_id == family_id)
    }
}
