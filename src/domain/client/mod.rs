//! Client aggregate
//!
//! Clients are the authenticated principals of the service.

pub mod model;
pub mod repository;

pub use model::{Client, ClientDraft, ClientUpdate, NewClient, Role};
pub use repository::ClientRepository;
