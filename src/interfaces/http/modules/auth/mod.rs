//! Authentication module: token login

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
