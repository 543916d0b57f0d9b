//! Booking lifecycle

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::application::access::AccessPolicy;
use crate::application::availability::AvailabilityEngine;
use crate::domain::{
    Actor, Booking, DomainError, DomainResult, NewBooking, RepositoryProvider,
};
use crate::shared::i18n::SharedMessages;

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessPolicy>,
    availability: Arc<AvailabilityEngine>,
    messages: SharedMessages,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        access: Arc<AccessPolicy>,
        availability: Arc<AvailabilityEngine>,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            access,
            availability,
            messages,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Booking>> {
        self.repos.bookings().find_by_id(id).await
    }

    pub async fn load(&self, id: i32) -> DomainResult<Booking> {
        self.get(id).await?.ok_or_else(|| {
            DomainError::BookingNotFound(self.messages.message("booking.not-found"))
        })
    }

    pub async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Booking>> {
        if self.repos.rooms().find_by_id(room_id).await?.is_none() {
            return Err(DomainError::RoomNotFound(self.messages.message("room.not-found")));
        }
        self.repos.bookings().find_by_room(room_id).await
    }

    pub async fn find_mine(&self, actor: &Actor) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_client(actor.client_id).await
    }

    /// Books `room_id` for the actor over `[start, end)`.
    pub async fn create(
        &self,
        actor: &Actor,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Booking> {
        let range = self.availability.range(start, end)?;
        self.require_client(actor).await?;
        if self.repos.rooms().find_by_id(room_id).await?.is_none() {
            return Err(DomainError::RoomNotFound(self.messages.message("room.not-found")));
        }

        self.availability
            .check_booking(room_id, &range, None, true)
            .await?;
        let write = self
            .repos
            .bookings()
            .insert_if_free(NewBooking::new(room_id, actor.client_id, range))
            .await?;
        let booking = self.availability.accept(room_id, write)?;

        info!(
            booking_id = booking.id,
            room_id,
            client_id = actor.client_id,
            start = %booking.start_date,
            end = %booking.end_date,
            "Booking created"
        );
        Ok(booking)
    }

    /// Moves an existing booking. Room and client stay attached; the
    /// booking does not conflict with itself.
    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(id).await?;
        self.check_owner(actor, &booking).await?;

        let range = self.availability.range(start, end)?;
        let start_changed = range.start() != booking.start_date;
        self.availability
            .check_booking(booking.room_id, &range, Some(booking.id), start_changed)
            .await?;

        booking.reschedule(range);
        let room_id = booking.room_id;
        let write = self.repos.bookings().update_if_free(booking).await?;
        let booking = self.availability.accept(room_id, write)?;

        info!(booking_id = booking.id, "Booking rescheduled");
        Ok(booking)
    }

    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        let booking = self.load(id).await?;
        self.check_owner(actor, &booking).await?;

        self.repos.bookings().delete(booking.id).await?;
        info!(booking_id = booking.id, "Booking cancelled");
        Ok(())
    }

    /// Owner or admin. Only an admin may touch a booking whose owner is gone.
    async fn check_owner(&self, actor: &Actor, booking: &Booking) -> DomainResult<()> {
        match self.repos.clients().find_by_id(booking.client_id).await? {
            Some(owner) => self.access.check_possibility_action(actor, &owner.login),
            None => self.access.require_admin(actor),
        }
    }

    async fn require_client(&self, actor: &Actor) -> DomainResult<()> {
        match self.repos.clients().find_by_id(actor.client_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::ClientNotFound(
                self.messages.message("client.not-found"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures::{admin, Fixture};
    use crate::domain::booking::BookingWrite;
    use crate::domain::DateRange;

    #[tokio::test]
    async fn adjacent_bookings_both_succeed() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let guest = fx.register("guest").await;
        let bookings = &fx.services.bookings;

        bookings
            .create(&guest, room.id, fx.future(1), fx.future(5))
            .await
            .unwrap();
        bookings
            .create(&guest, room.id, fx.future(5), fx.future(10))
            .await
            .unwrap();
        assert_eq!(bookings.find_by_room(room.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let boris = fx.register("boris").await;

        fx.services
            .bookings
            .create(&anna, room.id, fx.future(1), fx.future(10))
            .await
            .unwrap();
        let err = fx
            .services
            .bookings
            .create(&boris, room.id, fx.future(5), fx.future(7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Booking(_)));
        assert_eq!(err.to_string(), "Room is already booked for the given dates");
    }

    #[tokio::test]
    async fn booking_in_the_past_is_rejected() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let guest = fx.register("guest").await;
        let start = AvailabilityEngine::today() - chrono::Duration::days(3);
        let err = fx
            .services
            .bookings
            .create(&guest, room.id, start, fx.future(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Booking(_)));
    }

    #[tokio::test]
    async fn rescheduling_to_same_range_succeeds() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let guest = fx.register("guest").await;
        let booking = fx
            .services
            .bookings
            .create(&guest, room.id, fx.future(1), fx.future(5))
            .await
            .unwrap();

        let same = fx
            .services
            .bookings
            .update(&guest, booking.id, fx.future(1), fx.future(5))
            .await
            .unwrap();
        assert_eq!(same, booking);
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_cancel() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let boris = fx.register("boris").await;
        let booking = fx
            .services
            .bookings
            .create(&anna, room.id, fx.future(1), fx.future(2))
            .await
            .unwrap();

        let err = fx
            .services
            .bookings
            .delete(&boris, booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientAccess(_)));

        fx.services.bookings.delete(&admin(), booking.id).await.unwrap();
        assert!(fx.services.bookings.get(booking.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn own_bookings_are_listed() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let boris = fx.register("boris").await;
        fx.services
            .bookings
            .create(&anna, room.id, fx.future(1), fx.future(2))
            .await
            .unwrap();
        fx.services
            .bookings
            .create(&boris, room.id, fx.future(2), fx.future(3))
            .await
            .unwrap();

        let mine = fx.services.bookings.find_mine(&anna).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].client_id, anna.client_id);
    }

    #[tokio::test]
    async fn concurrent_overlapping_creates_admit_one() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let boris = fx.register("boris").await;

        let (a, b) = tokio::join!(
            fx.services
                .bookings
                .create(&anna, room.id, fx.future(1), fx.future(4)),
            fx.services
                .bookings
                .create(&boris, room.id, fx.future(2), fx.future(6)),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    }

    #[tokio::test]
    async fn deleted_client_cannot_book() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let ghost = fx.register("ghost").await;
        fx.services.clients.delete(&ghost, ghost.client_id).await.unwrap();

        let err = fx
            .services
            .bookings
            .create(&ghost, room.id, fx.future(1), fx.future(30))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ClientNotFound(_)));
        assert!(fx.services.bookings.find_by_room(room.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_without_owner_is_cancelled_by_admin_only() {
        let fx = Fixture::new();
        let (_, room) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let range = DateRange::new(fx.future(1), fx.future(30)).unwrap();
        let BookingWrite::Stored(orphan) = fx
            .services
            .repos
            .bookings()
            .insert_if_free(NewBooking::new(room.id, 9_999, range))
            .await
            .unwrap()
        else {
            panic!("booking must be stored");
        };

        let err = fx
            .services
            .bookings
            .delete(&anna, orphan.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientAccess(_)));

        fx.services.bookings.delete(&admin(), orphan.id).await.unwrap();
        fx.services.rooms.delete(&admin(), room.id).await.unwrap();
    }
}
