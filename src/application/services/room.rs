//! Room lifecycle and date queries

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::application::access::AccessPolicy;
use crate::application::availability::AvailabilityEngine;
use crate::application::validation::{FieldViolation, ValidationService};
use crate::domain::{
    Actor, DateRange, DomainError, DomainResult, NewRoom, RepositoryProvider, Room, RoomDraft,
};
use crate::shared::i18n::SharedMessages;

pub struct RoomService {
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessPolicy>,
    availability: Arc<AvailabilityEngine>,
    validation: Arc<ValidationService>,
    messages: SharedMessages,
}

impl RoomService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        access: Arc<AccessPolicy>,
        availability: Arc<AvailabilityEngine>,
        validation: Arc<ValidationService>,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            access,
            availability,
            validation,
            messages,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Room>> {
        self.repos.rooms().find_by_id(id).await
    }

    pub async fn load(&self, id: i32) -> DomainResult<Room> {
        self.get(id).await?.ok_or_else(|| {
            DomainError::RoomNotFound(self.messages.message("room.not-found"))
        })
    }

    /// Rooms of a hotel ordered by number
    pub async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>> {
        self.require_hotel(hotel_id).await?;
        self.repos.rooms().find_by_hotel(hotel_id).await
    }

    pub async fn find_available(&self, hotel_id: i32, range: &DateRange) -> DomainResult<Vec<Room>> {
        self.availability.find_rooms_for_date(hotel_id, range, true).await
    }

    pub async fn find_booked(&self, hotel_id: i32, range: &DateRange) -> DomainResult<Vec<Room>> {
        self.availability.find_rooms_for_date(hotel_id, range, false).await
    }

    pub async fn save(&self, actor: &Actor, hotel_id: i32, draft: RoomDraft) -> DomainResult<Room> {
        self.access.require_admin(actor)?;
        self.require_hotel(hotel_id).await?;
        self.validate(hotel_id, &draft, None).await?;

        let room = self.repos.rooms().insert(NewRoom::new(hotel_id, draft)).await?;
        info!(room_id = room.id, hotel_id, number = room.number, "Room created");
        Ok(room)
    }

    /// The room stays in its hotel; only number, type and price change.
    pub async fn update(&self, actor: &Actor, id: i32, draft: RoomDraft) -> DomainResult<Room> {
        let mut room = self.load(id).await?;
        self.access.require_admin(actor)?;
        self.validate(room.hotel_id, &draft, Some(room.id)).await?;

        room.apply(draft);
        let room = self.repos.rooms().update(room).await?;
        info!(room_id = room.id, "Room updated");
        Ok(room)
    }

    /// Refused while the room has a booking that has not ended yet.
    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        let room = self.load(id).await?;
        self.access.require_admin(actor)?;

        let active = self
            .repos
            .bookings()
            .count_active_for_rooms(&[room.id], AvailabilityEngine::today())
            .await?;
        if active > 0 {
            return Err(DomainError::RoomInUse(self.messages.message("room.in-use")));
        }

        self.repos.rooms().delete(room.id).await?;
        info!(room_id = room.id, "Room deleted");
        Ok(())
    }

    async fn require_hotel(&self, hotel_id: i32) -> DomainResult<()> {
        match self.repos.hotels().find_by_id(hotel_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::HotelNotFound(
                self.messages.message("hotel.not-found"),
            )),
        }
    }

    /// Number unique within the hotel (ignoring `current`) and a positive
    /// price.
    async fn validate(
        &self,
        hotel_id: i32,
        draft: &RoomDraft,
        current: Option<i32>,
    ) -> DomainResult<()> {
        let mut violations = Vec::new();

        if draft.price <= Decimal::ZERO {
            violations.push(FieldViolation::new("price", "positive"));
        }

        let clash = self
            .repos
            .rooms()
            .find_by_hotel_and_number(hotel_id, draft.number)
            .await?;
        if clash.is_some_and(|other| Some(other.id) != current) {
            violations.push(FieldViolation::new("number", "room-number-taken"));
        }

        self.validation.fail_if_any(violations)
    }
}
