//! Availability queries and booking admission against the store

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::domain::booking::{self, BookingWrite};
use crate::domain::{
    Booking, BookingRejection, DateRange, DomainError, DomainResult, RepositoryProvider, Room,
};
use crate::shared::i18n::SharedMessages;

pub struct AvailabilityEngine {
    repos: Arc<dyn RepositoryProvider>,
    messages: SharedMessages,
}

impl AvailabilityEngine {
    pub fn new(repos: Arc<dyn RepositoryProvider>, messages: SharedMessages) -> Self {
        Self { repos, messages }
    }

    /// Current date in UTC; bookings are day-granular.
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Range for already-parsed dates; an empty or inverted range is a
    /// booking error.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> DomainResult<DateRange> {
        DateRange::new(start, end)
            .ok_or_else(|| DomainError::Booking(self.messages.message("booking.invalid-range")))
    }

    /// True when no booking of the room overlaps `range`.
    pub async fn is_available(&self, room_id: i32, range: &DateRange) -> DomainResult<bool> {
        let bookings = self.repos.bookings().find_by_room(room_id).await?;
        Ok(booking::is_free(&bookings, range, None))
    }

    /// Rooms of the hotel that are free (`want_available`) or taken for
    /// `range`, ordered by room number.
    pub async fn find_rooms_for_date(
        &self,
        hotel_id: i32,
        range: &DateRange,
        want_available: bool,
    ) -> DomainResult<Vec<Room>> {
        if self.repos.hotels().find_by_id(hotel_id).await?.is_none() {
            return Err(DomainError::HotelNotFound(
                self.messages.message("hotel.not-found"),
            ));
        }

        let rooms = self.repos.rooms().find_by_hotel(hotel_id).await?;
        let ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();
        let bookings = self.repos.bookings().find_by_rooms(&ids).await?;
        let (free, taken) = booking::partition_rooms(&ids, &bookings, range);
        let wanted = if want_available { free } else { taken };

        debug!(
            hotel_id,
            start = %range.start(),
            end = %range.end(),
            want_available,
            matched = wanted.len(),
            "Room availability computed"
        );

        Ok(rooms.into_iter().filter(|r| wanted.contains(&r.id)).collect())
    }

    /// Rejects a range starting in the past (when `start_changed`) or one
    /// that overlaps another booking of the room. `exclude` is the booking
    /// being rescheduled.
    pub async fn check_booking(
        &self,
        room_id: i32,
        range: &DateRange,
        exclude: Option<i32>,
        start_changed: bool,
    ) -> DomainResult<()> {
        let existing = self.repos.bookings().find_by_room(room_id).await?;
        booking::check_booking(&existing, range, exclude, Self::today(), start_changed)
            .map_err(|rejection| self.rejected(room_id, rejection))
    }

    /// Unwraps a guarded write, turning a late-detected overlap into the
    /// same error the pre-check produces.
    pub fn accept(&self, room_id: i32, write: BookingWrite) -> DomainResult<Booking> {
        match write {
            BookingWrite::Stored(booking) => Ok(booking),
            BookingWrite::Overlaps { existing_id } => Err(self.rejected(
                room_id,
                BookingRejection::Overlap {
                    booking_id: existing_id,
                },
            )),
        }
    }

    fn rejected(&self, room_id: i32, rejection: BookingRejection) -> DomainError {
        let key = match rejection {
            BookingRejection::InPast => "booking.past",
            BookingRejection::Overlap { booking_id } => {
                info!(room_id, conflicting = booking_id, "Booking overlaps existing booking");
                "booking.overlap"
            }
        };
        DomainError::Booking(self.messages.message(key))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{HotelDraft, NewBooking, NewRoom, RoomDraft};
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::shared::i18n::MessageCatalog;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn setup() -> (AvailabilityEngine, Arc<InMemoryStorage>, i32, Vec<i32>) {
        let store = Arc::new(InMemoryStorage::new());
        let hotel = store
            .hotels()
            .insert(HotelDraft {
                name: "Seaside".into(),
                address: "1 Beach Rd".into(),
                description: None,
            })
            .await
            .unwrap();
        let mut rooms = Vec::new();
        for number in [101, 102, 103] {
            let room = store
                .rooms()
                .insert(NewRoom::new(
                    hotel.id,
                    RoomDraft {
                        number,
                        room_type: "double".into(),
                        price: Decimal::new(9900, 2),
                    },
                ))
                .await
                .unwrap();
            rooms.push(room.id);
        }
        let messages = Arc::new(MessageCatalog::embedded("en").unwrap());
        let engine = AvailabilityEngine::new(store.clone(), messages);
        (engine, store, hotel.id, rooms)
    }

    async fn book(store: &InMemoryStorage, room_id: i32, start: NaiveDate, end: NaiveDate) -> i32 {
        let range = DateRange::new(start, end).unwrap();
        match store
            .bookings()
            .insert_if_free(NewBooking::new(room_id, 1, range))
            .await
            .unwrap()
        {
            BookingWrite::Stored(b) => b.id,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn availability_is_negation_of_overlap() {
        let (engine, store, _, rooms) = setup().await;
        book(&store, rooms[0], d(2099, 1, 1), d(2099, 1, 10)).await;

        let inside = DateRange::new(d(2099, 1, 5), d(2099, 1, 7)).unwrap();
        let after = DateRange::new(d(2099, 1, 10), d(2099, 1, 12)).unwrap();
        assert!(!engine.is_available(rooms[0], &inside).await.unwrap());
        assert!(engine.is_available(rooms[0], &after).await.unwrap());
        assert!(engine.is_available(rooms[1], &inside).await.unwrap());
    }

    #[tokio::test]
    async fn rooms_are_partitioned_by_date() {
        let (engine, store, hotel_id, rooms) = setup().await;
        book(&store, rooms[1], d(2099, 2, 1), d(2099, 2, 5)).await;
        let range = DateRange::new(d(2099, 2, 3), d(2099, 2, 4)).unwrap();

        let free = engine.find_rooms_for_date(hotel_id, &range, true).await.unwrap();
        let taken = engine.find_rooms_for_date(hotel_id, &range, false).await.unwrap();
        assert_eq!(
            free.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![101, 103]
        );
        assert_eq!(taken.iter().map(|r| r.id).collect::<Vec<_>>(), vec![rooms[1]]);
    }

    #[tokio::test]
    async fn unknown_hotel_is_reported() {
        let (engine, _, _, _) = setup().await;
        let range = DateRange::new(d(2099, 2, 3), d(2099, 2, 4)).unwrap();
        let err = engine.find_rooms_for_date(999, &range, true).await.unwrap_err();
        assert!(matches!(err, DomainError::HotelNotFound(_)));
    }

    #[tokio::test]
    async fn past_and_overlapping_ranges_are_booking_errors() {
        let (engine, store, _, rooms) = setup().await;
        let id = book(&store, rooms[0], d(2099, 3, 1), d(2099, 3, 10)).await;

        let past = DateRange::new(d(2000, 1, 1), d(2000, 1, 3)).unwrap();
        let clash = DateRange::new(d(2099, 3, 5), d(2099, 3, 7)).unwrap();
        assert!(matches!(
            engine.check_booking(rooms[0], &past, None, true).await,
            Err(DomainError::Booking(_))
        ));
        assert!(matches!(
            engine.check_booking(rooms[0], &clash, None, true).await,
            Err(DomainError::Booking(_))
        ));
        assert!(engine
            .check_booking(rooms[0], &clash, Some(id), true)
            .await
            .is_ok());
    }

    #[test]
    fn inverted_dates_are_booking_errors() {
        let engine = AvailabilityEngine::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(MessageCatalog::embedded("en").unwrap()),
        );
        let err = engine.range(d(2099, 1, 5), d(2099, 1, 5)).unwrap_err();
        assert_eq!(err.to_string(), "Start date must be before end date");
    }
}
