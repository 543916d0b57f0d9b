//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, NewBooking};
use crate::domain::DomainResult;

/// Outcome of a guarded booking write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingWrite {
    Stored(Booking),
    /// Another booking of the same room overlaps; nothing was written.
    Overlaps { existing_id: i32 },
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Bookings of one room ordered by start date
    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Booking>>;

    /// Bookings of any of the given rooms
    async fn find_by_rooms(&self, room_ids: &[i32]) -> DomainResult<Vec<Booking>>;

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Booking>>;

    /// Number of bookings of the given rooms still running on `today`
    async fn count_active_for_rooms(&self, room_ids: &[i32], today: NaiveDate)
        -> DomainResult<u64>;

    /// Re-checks overlap against the room's bookings and inserts, as one
    /// atomic step.
    async fn insert_if_free(&self, booking: NewBooking) -> DomainResult<BookingWrite>;

    /// Same as [`insert_if_free`](Self::insert_if_free) for an existing
    /// booking; the booking itself is excluded from the overlap check.
    async fn update_if_free(&self, booking: Booking) -> DomainResult<BookingWrite>;

    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
