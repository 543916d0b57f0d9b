//! Core entities, pure booking rules and repository traits.

pub mod access;
pub mod booking;
pub mod client;
pub mod hotel;
pub mod repositories;
pub mod review;
pub mod room;

// Re-export commonly used types
pub use access::Actor;
pub use booking::{Booking, BookingRejection, DateRange, NewBooking};
pub use client::{Client, ClientDraft, ClientUpdate, NewClient, Role};
pub use hotel::{Hotel, HotelDraft};
pub use repositories::RepositoryProvider;
pub use review::{NewReview, Review, ReviewDraft};
pub use room::{NewRoom, Room, RoomDraft};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
