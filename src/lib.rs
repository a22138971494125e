//! Crop rotation advisory engine.
//!
//! Given a plot's planting history and a catalogue of botanical families,
//! [`RotationEngine::advise`] estimates soil nitrogen/phosphorus/potassium
//! status, lists the families still inside their rest interval, ranks the
//! families that may be planted, and optionally classifies one candidate
//! species as safe, warning or blocked.
//!
//! The engine is pure and synchronous: no I/O, no shared state.

pub mod config;
pub mod error;
pub mod input;
pub mod logic;
pub mod models;

pub use config::{Config, RotationSettings};
pub use error::{Result, RotationError};
pub use input::AdvisoryDocument;
pub use logic::{AdvisoryRequest, RotationEngine};
