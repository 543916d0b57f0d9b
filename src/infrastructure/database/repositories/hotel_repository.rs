//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::hotel::{Hotel, HotelDraft, HotelRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{booking, hotel, review, room};

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        address: m.address,
        description: m.description,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn insert(&self, draft: HotelDraft) -> DomainResult<Hotel> {
        debug!("Inserting hotel: {}", draft.name);

        let model = hotel::ActiveModel {
            name: Set(draft.name),
            address: Set(draft.address),
            description: Set(draft.description),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, h: Hotel) -> DomainResult<Hotel> {
        debug!("Updating hotel: {}", h.id);

        let model = hotel::ActiveModel {
            id: Set(h.id),
            name: Set(h.name),
            address: Set(h.address),
            description: Set(h.description),
        };
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        debug!("Deleting hotel with dependants: {}", id);

        let txn = self.db.begin().await.map_err(db_err)?;

        let room_ids: Vec<i32> = room::Entity::find()
            .select_only()
            .column(room::Column::Id)
            .filter(room::Column::HotelId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err)?;

        if !room_ids.is_empty() {
            booking::Entity::delete_many()
                .filter(booking::Column::RoomId.is_in(room_ids))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }
        room::Entity::delete_many()
            .filter(room::Column::HotelId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        review::Entity::delete_many()
            .filter(review::Column::HotelId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = hotel::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
