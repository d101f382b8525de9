//! AI components

pub mod controller;


// Re-export all components
pub use controller::*;
