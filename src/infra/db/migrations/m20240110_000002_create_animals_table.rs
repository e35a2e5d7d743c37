//! Migration: Create the animals table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Animals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Animals::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Animals::Species).string_len(50).not_null())
                    .col(ColumnDef::new(Animals::Breed).string_len(100).not_null())
                    .col(ColumnDef::new(Animals::Age).integer().null())
                    .col(ColumnDef::new(Animals::Gender).string_len(10).not_null())
                    .col(ColumnDef::new(Animals::Description).text().null())
                    .col(ColumnDef::new(Animals::PhotoUrl).string().not_null())
                    .col(
                        ColumnDef::new(Animals::AdoptionStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Animals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Animals::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Animals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Animals::UpdatedBy).string().null())
                    .col(
                        ColumnDef::new(Animals::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_animals_deleted_at")
                    .table(Animals::Table)
                    .col(Animals::DeletedAt)
                    .to_owned(),
            )
            .await?;

        // Index for the catalog's adoption-status filter
        manager
            .create_index(
                Index::create()
                    .name("idx_animals_adoption_status")
                    .table(Animals::Table)
                    .col(Animals::AdoptionStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
    Name,
    Species,
    Breed,
    Age,
    Gender,
    Description,
    PhotoUrl,
    AdoptionStatus,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    DeletedAt,
}
