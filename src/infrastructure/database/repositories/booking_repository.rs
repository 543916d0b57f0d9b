//! SeaORM implementation of BookingRepository
//!
//! Guarded writes run the overlap query and the write in one transaction.
//! On PostgreSQL the transaction is SERIALIZABLE. SQLite has no isolation
//! levels; a writer that loses the race fails with SQLITE_BUSY, which
//! surfaces as a storage error and is not retried.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use super::db_err;
use crate::domain::booking::{Booking, BookingRepository, BookingWrite, DateRange, NewBooking};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin_guarded(&self) -> DomainResult<DatabaseTransaction> {
        let isolation = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => None,
            _ => Some(IsolationLevel::Serializable),
        };
        self.db
            .begin_with_config(isolation, None)
            .await
            .map_err(db_err)
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        room_id: m.room_id,
        client_id: m.client_id,
        start_date: m.start_date,
        end_date: m.end_date,
    }
}

/// First booking of `room_id` overlapping `range`, other than `exclude`
async fn find_conflict<C: ConnectionTrait>(
    conn: &C,
    room_id: i32,
    range: &DateRange,
    exclude: Option<i32>,
) -> DomainResult<Option<booking::Model>> {
    let mut query = booking::Entity::find()
        .filter(booking::Column::RoomId.eq(room_id))
        .filter(booking::Column::StartDate.lt(range.end()))
        .filter(booking::Column::EndDate.gt(range.start()));
    if let Some(id) = exclude {
        query = query.filter(booking::Column::Id.ne(id));
    }
    query
        .order_by_asc(booking::Column::StartDate)
        .one(conn)
        .await
        .map_err(db_err)
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .order_by_asc(booking::Column::StartDate)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_rooms(&self, room_ids: &[i32]) -> DomainResult<Vec<Booking>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.is_in(room_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::ClientId.eq(client_id))
            .order_by_asc(booking::Column::StartDate)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_active_for_rooms(
        &self,
        room_ids: &[i32],
        today: NaiveDate,
    ) -> DomainResult<u64> {
        if room_ids.is_empty() {
            return Ok(0);
        }
        booking::Entity::find()
            .filter(booking::Column::RoomId.is_in(room_ids.iter().copied()))
            .filter(booking::Column::EndDate.gt(today))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn insert_if_free(&self, b: NewBooking) -> DomainResult<BookingWrite> {
        debug!(
            "Guarded insert for room {}: [{}, {})",
            b.room_id, b.start_date, b.end_date
        );

        let txn = self.begin_guarded().await?;

        if let Some(conflict) = find_conflict(&txn, b.room_id, &b.range(), None).await? {
            txn.rollback().await.map_err(db_err)?;
            return Ok(BookingWrite::Overlaps {
                existing_id: conflict.id,
            });
        }

        let model = booking::ActiveModel {
            room_id: Set(b.room_id),
            client_id: Set(b.client_id),
            start_date: Set(b.start_date),
            end_date: Set(b.end_date),
            ..Default::default()
        };
        let saved = model.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(BookingWrite::Stored(model_to_domain(saved)))
    }

    async fn update_if_free(&self, b: Booking) -> DomainResult<BookingWrite> {
        debug!(
            "Guarded update of booking {}: [{}, {})",
            b.id, b.start_date, b.end_date
        );

        let txn = self.begin_guarded().await?;

        if let Some(conflict) = find_conflict(&txn, b.room_id, &b.range(), Some(b.id)).await? {
            txn.rollback().await.map_err(db_err)?;
            return Ok(BookingWrite::Overlaps {
                existing_id: conflict.id,
            });
        }

        let model = booking::ActiveModel {
            id: Set(b.id),
            room_id: Set(b.room_id),
            client_id: Set(b.client_id),
            start_date: Set(b.start_date),
            end_date: Set(b.end_date),
        };
        let saved = model.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(BookingWrite::Stored(model_to_domain(saved)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
