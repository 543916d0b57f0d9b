//! Liveness and store connectivity

pub mod handlers;

pub use handlers::*;
