//! Create `agents` table.
//!
//! `id` is caller-assigned; the primary key carries the uniqueness
//! guarantee a duplicate create must trip over.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(big_integer(Agents::Id).primary_key())
                    .col(string_len(Agents::FirstName, 128).not_null())
                    .col(string_len(Agents::LastName, 128).not_null())
                    .col(string_len(Agents::PhoneNumber, 32).not_null())
                    .col(integer(Agents::Rank).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Agents::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Agents { Table, Id, FirstName, LastName, PhoneNumber, Rank }
