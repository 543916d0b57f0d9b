//! Structural validation with one aggregated, localized message

pub mod service;

pub use service::{FieldViolation, ValidationService};
