//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::client::ClientRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::review::ReviewRepository;
use crate::domain::room::RoomRepository;
use crate::domain::DomainResult;

use super::booking_repository::SeaOrmBookingRepository;
use super::client_repository::SeaOrmClientRepository;
use super::db_err;
use super::hotel_repository::SeaOrmHotelRepository;
use super::review_repository::SeaOrmReviewRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id(7).await?;
/// let taken = repos.bookings().find_by_room(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    clients: SeaOrmClientRepository,
    bookings: SeaOrmBookingRepository,
    reviews: SeaOrmReviewRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            hotels: SeaOrmHotelRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            clients: SeaOrmClientRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn clients(&self) -> &dyn ClientRepository {
        &self.clients
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.ping().await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::booking::BookingWrite;
    use crate::domain::{
        DateRange, HotelDraft, NewBooking, NewClient, NewReview, NewRoom, Role, RoomDraft,
    };
    use crate::infrastructure::database::{init_database, migrator::Migrator, DatabaseConfig};

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2032, 8, day).unwrap()
    }

    #[tokio::test]
    async fn schema_round_trip_and_guarded_booking() {
        let repos = provider().await;
        repos.ping().await.unwrap();

        let hotel = repos
            .hotels()
            .insert(HotelDraft {
                name: "Lakeside".into(),
                address: "Shore 2".into(),
                description: None,
            })
            .await
            .unwrap();
        let room = repos
            .rooms()
            .insert(NewRoom::new(
                hotel.id,
                RoomDraft {
                    number: 12,
                    room_type: "twin".into(),
                    price: Decimal::new(8_000, 2),
                },
            ))
            .await
            .unwrap();
        assert_eq!(repos.rooms().find_by_id(room.id).await.unwrap(), Some(room.clone()));

        let client = repos
            .clients()
            .insert(NewClient {
                login: "lake".into(),
                password_hash: "hash".into(),
                name: "Lake".into(),
                roles: BTreeSet::from([Role::User, Role::Admin]),
            })
            .await
            .unwrap();
        assert_eq!(
            repos.clients().find_by_login("lake").await.unwrap().unwrap().roles,
            client.roles
        );

        let first = NewBooking::new(room.id, client.id, DateRange::new(d(1), d(5)).unwrap());
        let adjacent = NewBooking::new(room.id, client.id, DateRange::new(d(5), d(8)).unwrap());
        let clash = NewBooking::new(room.id, client.id, DateRange::new(d(3), d(6)).unwrap());

        let BookingWrite::Stored(stored) = repos.bookings().insert_if_free(first).await.unwrap()
        else {
            panic!("first booking must be stored");
        };
        assert!(matches!(
            repos.bookings().insert_if_free(adjacent).await.unwrap(),
            BookingWrite::Stored(_)
        ));
        assert_eq!(
            repos.bookings().insert_if_free(clash).await.unwrap(),
            BookingWrite::Overlaps {
                existing_id: stored.id
            }
        );

        // rescheduling onto its own dates is not a conflict
        assert!(matches!(
            repos.bookings().update_if_free(stored.clone()).await.unwrap(),
            BookingWrite::Stored(_)
        ));
        assert_eq!(
            repos
                .bookings()
                .count_active_for_rooms(&[room.id], d(6))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn duplicate_review_hits_unique_index() {
        let repos = provider().await;
        let hotel = repos
            .hotels()
            .insert(HotelDraft {
                name: "Dunes".into(),
                address: "Sand 1".into(),
                description: Some("Desert camp".into()),
            })
            .await
            .unwrap();
        let client = repos
            .clients()
            .insert(NewClient {
                login: "nomad".into(),
                password_hash: "hash".into(),
                name: "Nomad".into(),
                roles: BTreeSet::from([Role::User]),
            })
            .await
            .unwrap();
        let review = || NewReview {
            client_id: client.id,
            hotel_id: hotel.id,
            rating: 4,
            text: "Starry nights".into(),
            created_at: Utc::now(),
        };

        assert!(repos.reviews().insert(review()).await.unwrap().is_some());
        assert!(repos.reviews().insert(review()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn client_delete_cascades() {
        let repos = provider().await;
        let hotel = repos
            .hotels()
            .insert(HotelDraft {
                name: "Peak".into(),
                address: "Summit".into(),
                description: None,
            })
            .await
            .unwrap();
        let room = repos
            .rooms()
            .insert(NewRoom::new(
                hotel.id,
                RoomDraft {
                    number: 1,
                    room_type: "cabin".into(),
                    price: Decimal::new(50, 0),
                },
            ))
            .await
            .unwrap();
        let client = repos
            .clients()
            .insert(NewClient {
                login: "climber".into(),
                password_hash: "hash".into(),
                name: "Climber".into(),
                roles: BTreeSet::from([Role::User]),
            })
            .await
            .unwrap();
        repos
            .bookings()
            .insert_if_free(NewBooking::new(
                room.id,
                client.id,
                DateRange::new(d(10), d(11)).unwrap(),
            ))
            .await
            .unwrap();

        assert!(repos.clients().delete(client.id).await.unwrap());
        assert!(repos.bookings().find_by_room(room.id).await.unwrap().is_empty());
        assert!(!repos.clients().delete(client.id).await.unwrap());
    }
}
