//! Hotel repository interface

use async_trait::async_trait;

use super::model::{Hotel, HotelDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn insert(&self, draft: HotelDraft) -> DomainResult<Hotel>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>>;

    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    async fn update(&self, hotel: Hotel) -> DomainResult<Hotel>;

    /// Remove the hotel together with its rooms, their bookings and the
    /// hotel's reviews. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
