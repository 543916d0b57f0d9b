//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use super::db_err;
use crate::domain::review::{NewReview, Review, ReviewRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::review;

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: review::Model) -> Review {
    Review {
        id: m.id,
        client_id: m.client_id,
        hotel_id: m.hotel_id,
        rating: m.rating,
        text: m.text,
        created_at: m.created_at,
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn insert(&self, r: NewReview) -> DomainResult<Option<Review>> {
        debug!("Inserting review of hotel {} by client {}", r.hotel_id, r.client_id);

        let model = review::ActiveModel {
            client_id: Set(r.client_id),
            hotel_id: Set(r.hotel_id),
            rating: Set(r.rating),
            text: Set(r.text),
            created_at: Set(r.created_at),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(saved) => Ok(Some(model_to_domain(saved))),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::HotelId.eq(hotel_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_client_and_hotel(
        &self,
        client_id: i32,
        hotel_id: i32,
    ) -> DomainResult<Option<Review>> {
        let model = review::Entity::find()
            .filter(review::Column::ClientId.eq(client_id))
            .filter(review::Column::HotelId.eq(hotel_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Review) -> DomainResult<Review> {
        debug!("Updating review: {}", r.id);

        let model = review::ActiveModel {
            id: Set(r.id),
            client_id: Set(r.client_id),
            hotel_id: Set(r.hotel_id),
            rating: Set(r.rating),
            text: Set(r.text),
            created_at: Set(r.created_at),
        };
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = review::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
