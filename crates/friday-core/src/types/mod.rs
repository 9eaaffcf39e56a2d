//! Core data types for FRIDAY LITE.

mod message;
mod note;
mod quiz;
mod task;
mod theme;

pub use message::*;
pub use note::*;
pub use quiz::*;
pub use task::*;
pub use theme::*;
