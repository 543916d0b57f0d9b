//! Review repository interface

use async_trait::async_trait;

use super::model::{NewReview, Review};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Returns `None` when the client already reviewed this hotel.
    async fn insert(&self, review: NewReview) -> DomainResult<Option<Review>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>>;

    /// Newest first
    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Review>>;

    async fn find_by_client_and_hotel(
        &self,
        client_id: i32,
        hotel_id: i32,
    ) -> DomainResult<Option<Review>>;

    async fn update(&self, review: Review) -> DomainResult<Review>;

    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
