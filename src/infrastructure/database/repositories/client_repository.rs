//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::client::{Client, ClientRepository, NewClient, Role};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{booking, client, review};

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: client::Model) -> Client {
    Client {
        id: m.id,
        login: m.login,
        password_hash: m.password_hash,
        name: m.name,
        roles: Role::split(&m.roles),
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn insert(&self, c: NewClient) -> DomainResult<Client> {
        debug!("Inserting client: {}", c.login);

        let model = client::ActiveModel {
            login: Set(c.login),
            password_hash: Set(c.password_hash),
            name: Set(c.name),
            roles: Set(Role::join(&c.roles)),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>> {
        let model = client::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<Client>> {
        let model = client::Entity::find()
            .filter(client::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Client>> {
        let models = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, c: Client) -> DomainResult<Client> {
        debug!("Updating client: {}", c.id);

        let model = client::ActiveModel {
            id: Set(c.id),
            login: Set(c.login),
            password_hash: Set(c.password_hash),
            name: Set(c.name),
            roles: Set(Role::join(&c.roles)),
        };
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        debug!("Deleting client with bookings and reviews: {}", id);

        let txn = self.db.begin().await.map_err(db_err)?;
        booking::Entity::delete_many()
            .filter(booking::Column::ClientId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        review::Entity::delete_many()
            .filter(review::Column::ClientId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = client::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> DomainResult<u64> {
        client::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
