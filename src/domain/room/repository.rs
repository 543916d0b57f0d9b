//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Fails with a storage error when the hotel already has a room with
    /// this number.
    async fn insert(&self, room: NewRoom) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// All rooms of a hotel, ordered by room number
    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>>;

    async fn find_by_hotel_and_number(
        &self,
        hotel_id: i32,
        number: i32,
    ) -> DomainResult<Option<Room>>;

    async fn update(&self, room: Room) -> DomainResult<Room>;

    /// Remove the room and its bookings. Returns `false` when nothing was
    /// deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
