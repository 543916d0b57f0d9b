//! Hotel lifecycle

use std::sync::Arc;

use tracing::info;

use crate::application::access::AccessPolicy;
use crate::application::availability::AvailabilityEngine;
use crate::domain::{Actor, DomainError, DomainResult, Hotel, HotelDraft, RepositoryProvider};
use crate::shared::i18n::SharedMessages;

pub struct HotelService {
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessPolicy>,
    messages: SharedMessages,
}

impl HotelService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        access: Arc<AccessPolicy>,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            access,
            messages,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Hotel>> {
        self.repos.hotels().find_by_id(id).await
    }

    /// Like [`get`](Self::get) but a missing hotel is an error.
    pub async fn load(&self, id: i32) -> DomainResult<Hotel> {
        self.get(id).await?.ok_or_else(|| self.not_found())
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        self.repos.hotels().find_all().await
    }

    pub async fn save(&self, actor: &Actor, draft: HotelDraft) -> DomainResult<Hotel> {
        self.access.require_admin(actor)?;
        let hotel = self.repos.hotels().insert(draft).await?;
        info!(hotel_id = hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub async fn update(&self, actor: &Actor, id: i32, draft: HotelDraft) -> DomainResult<Hotel> {
        let mut hotel = self.load(id).await?;
        self.access.require_admin(actor)?;
        hotel.apply(draft);
        let hotel = self.repos.hotels().update(hotel).await?;
        info!(hotel_id = hotel.id, "Hotel updated");
        Ok(hotel)
    }

    /// Refused while any room of the hotel has a booking that has not
    /// ended yet; otherwise rooms, bookings and reviews go with it.
    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        let hotel = self.load(id).await?;
        self.access.require_admin(actor)?;

        let room_ids: Vec<i32> = self
            .repos
            .rooms()
            .find_by_hotel(hotel.id)
            .await?
            .iter()
            .map(|r| r.id)
            .collect();
        let active = self
            .repos
            .bookings()
            .count_active_for_rooms(&room_ids, AvailabilityEngine::today())
            .await?;
        if active > 0 {
            return Err(DomainError::RoomInUse(self.messages.message("hotel.in-use")));
        }

        self.repos.hotels().delete(hotel.id).await?;
        info!(hotel_id = hotel.id, "Hotel deleted");
        Ok(())
    }

    fn not_found(&self) -> DomainError {
        DomainError::HotelNotFound(self.messages.message("hotel.not-found"))
    }
}
