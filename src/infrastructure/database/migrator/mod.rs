//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_hotels;
mod m20240101_000002_create_rooms;
mod m20240101_000003_create_clients;
mod m20240101_000004_create_bookings;
mod m20240101_000005_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_hotels::Migration),
            Box::new(m20240101_000002_create_rooms::Migration),
            Box::new(m20240101_000003_create_clients::Migration),
            Box::new(m20240101_000004_create_bookings::Migration),
            Box::new(m20240101_000005_create_reviews::Migration),
        ]
    }
}
