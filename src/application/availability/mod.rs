//! Room availability over date ranges

pub mod engine;

pub use engine::AvailabilityEngine;
