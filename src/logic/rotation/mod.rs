pub mod blocking;
pub mod engine;
pub mod history;
pub mod recommend;
pub mod soil;
pub mod species;

pub use engine::{AdvisoryRequest, RotationEngine};

use crate::config::RotationSettings;
use crate::models::{BlockedFamily, CandidateSpecies, SoilAnalysis, SpeciesAdvice};

/// Guard clause classifying a candidate species
///
/// Rules run in priority order; the first one returning advice wins.
pub trait SpeciesRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        candidate: &CandidateSpecies,
        blocked: &[BlockedFamily],
        soil: &SoilAnalysis,
        settings: &RotationSettings,
    ) -> Option<SpeciesAdvice>;
}
