//! Client repository interface

use async_trait::async_trait;

use super::model::{Client, NewClient};
use crate::domain::DomainResult;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Fails with a storage error when the login is already taken.
    async fn insert(&self, client: NewClient) -> DomainResult<Client>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>>;

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<Client>>;

    async fn find_all(&self) -> DomainResult<Vec<Client>>;

    async fn update(&self, client: Client) -> DomainResult<Client>;

    /// Remove the client with their bookings and reviews. Returns `false`
    /// when nothing was deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;

    async fn count(&self) -> DomainResult<u64>;
}
