//! Unified access to the per-aggregate repositories

use async_trait::async_trait;

use super::booking::BookingRepository;
use super::client::ClientRepository;
use super::hotel::HotelRepository;
use super::review::ReviewRepository;
use super::room::RoomRepository;
use crate::domain::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(7).await?;
///     let taken = repos.bookings().find_by_room(7).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn clients(&self) -> &dyn ClientRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn reviews(&self) -> &dyn ReviewRepository;

    /// Cheap round trip to the backing store, used by the health check.
    async fn ping(&self) -> DomainResult<()>;
}
