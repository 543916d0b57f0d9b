//! Create bookings table
//!
//! Overlap is enforced by the repository, not by a constraint; the
//! (room_id, start_date) index backs the overlap query.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_rooms::Rooms;
use super::m20240101_000003_create_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::RoomId).integer().not_null())
                    .col(ColumnDef::new(Bookings::ClientId).integer().not_null())
                    .col(ColumnDef::new(Bookings::StartDate).date().not_null())
                    .col(ColumnDef::new(Bookings::EndDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_room")
                            .from(Bookings::Table, Bookings::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_client")
                            .from(Bookings::Table, Bookings::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_start")
                    .table(Bookings::Table)
                    .col(Bookings::RoomId)
                    .col(Bookings::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_client")
                    .table(Bookings::Table)
                    .col(Bookings::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    RoomId,
    ClientId,
    StartDate,
    EndDate,
}
