//! # Hotel booking service
//!
//! REST backend for hotels, rooms, clients, bookings and reviews.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, booking range rules and repository traits
//! - **application**: services enforcing access, availability and validation
//! - **infrastructure**: SeaORM and in-memory stores, JWT and password hashing
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: error taxonomy, message catalogs, shutdown signalling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
