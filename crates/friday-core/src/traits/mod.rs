//! Core traits for FRIDAY LITE providers.

mod intent_detector;
mod store;

pub use intent_detector::*;
pub use store::*;
