//! Pure availability rules over already-loaded bookings

use std::collections::HashSet;

use chrono::NaiveDate;

use super::model::{Booking, DateRange};

/// Why a requested range cannot be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    /// The range starts before today.
    InPast,
    /// Overlaps booking `booking_id` of the same room.
    Overlap { booking_id: i32 },
}

/// First booking in `bookings` overlapping `range`, skipping `exclude`
pub fn first_conflict<'a>(
    bookings: &'a [Booking],
    range: &DateRange,
    exclude: Option<i32>,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|b| Some(b.id) != exclude)
        .find(|b| b.overlaps(range))
}

pub fn is_free(bookings: &[Booking], range: &DateRange, exclude: Option<i32>) -> bool {
    first_conflict(bookings, range, exclude).is_none()
}

/// Splits `room_ids` into rooms free for `range` and rooms with at least
/// one overlapping booking. Input order is kept in both halves.
pub fn partition_rooms(
    room_ids: &[i32],
    bookings: &[Booking],
    range: &DateRange,
) -> (Vec<i32>, Vec<i32>) {
    let busy: HashSet<i32> = bookings
        .iter()
        .filter(|b| b.overlaps(range))
        .map(|b| b.room_id)
        .collect();
    room_ids.iter().partition(|id| !busy.contains(id))
}

/// Full admission check for creating (`exclude = None`) or rescheduling a
/// booking. The past-date rule only applies when the start date is new.
pub fn check_booking(
    existing: &[Booking],
    range: &DateRange,
    exclude: Option<i32>,
    today: NaiveDate,
    start_changed: bool,
) -> Result<(), BookingRejection> {
    if start_changed && range.start() < today {
        return Err(BookingRejection::InPast);
    }
    match first_conflict(existing, range, exclude) {
        Some(b) => Err(BookingRejection::Overlap { booking_id: b.id }),
        None => Ok(()),
    }
}
