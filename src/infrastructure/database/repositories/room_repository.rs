//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::db_err;
use crate::domain::room::{NewRoom, Room, RoomRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{booking, room};

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        hotel_id: m.hotel_id,
        number: m.number,
        room_type: m.room_type,
        price: m.price,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn insert(&self, r: NewRoom) -> DomainResult<Room> {
        debug!("Inserting room {} into hotel {}", r.number, r.hotel_id);

        let model = room::ActiveModel {
            hotel_id: Set(r.hotel_id),
            number: Set(r.number),
            room_type: Set(r.room_type),
            price: Set(r.price),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_hotel_and_number(
        &self,
        hotel_id: i32,
        number: i32,
    ) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .filter(room::Column::Number.eq(number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Room) -> DomainResult<Room> {
        debug!("Updating room: {}", r.id);

        let model = room::ActiveModel {
            id: Set(r.id),
            hotel_id: Set(r.hotel_id),
            number: Set(r.number),
            room_type: Set(r.room_type),
            price: Set(r.price),
        };
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        debug!("Deleting room with bookings: {}", id);

        let txn = self.db.begin().await.map_err(db_err)?;
        booking::Entity::delete_many()
            .filter(booking::Column::RoomId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = room::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
