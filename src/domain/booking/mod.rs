//! Booking aggregate
//!
//! Contains the Booking entity, the half-open date range it occupies,
//! the pure overlap rules, and the repository interface.

pub mod availability;
pub mod model;
pub mod repository;

pub use availability::{check_booking, first_conflict, is_free, partition_rooms, BookingRejection};
pub use model::{Booking, DateRange, NewBooking};
pub use repository::{BookingRepository, BookingWrite};
