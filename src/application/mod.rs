//! Application layer: use cases over the domain
//!
//! - **access**: ownership and role checks
//! - **availability**: room availability and booking admission
//! - **validation**: field violations and their aggregated message
//! - **services**: per-resource lifecycle operations
//! - **identity**: login and token issuance

pub mod access;
pub mod availability;
pub mod identity;
pub mod ports;
pub mod services;
pub mod validation;

pub use access::AccessPolicy;
pub use availability::AvailabilityEngine;
pub use identity::{AuthResult, IdentityService};
pub use ports::PasswordHasher;
pub use services::{
    BookingService, ClientService, HotelService, ReviewService, RoomService, Services,
};
pub use validation::{FieldViolation, ValidationService};
