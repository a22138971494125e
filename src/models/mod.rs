pub mod advice;
pub mod planting;
pub mod soil;

pub use advice::*;
pub use planting::*;
pub use soil::*;
