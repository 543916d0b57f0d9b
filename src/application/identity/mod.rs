//! Identity: login and token issuance

pub mod service;

pub use service::{AuthResult, IdentityService};
