pub mod rotation;

pub use rotation::{AdvisoryRequest, RotationEngine};
