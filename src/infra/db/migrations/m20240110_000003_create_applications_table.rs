//! Migration: Create the applications table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::AnimalId).uuid().not_null())
                    .col(ColumnDef::new(Applications::AdopterId).uuid().not_null())
                    .col(ColumnDef::new(Applications::Reason).text().null())
                    .col(
                        ColumnDef::new(Applications::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Applications::UpdatedBy).string().null())
                    .col(
                        ColumnDef::new(Applications::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_animal")
                            .from(Applications::Table, Applications::AnimalId)
                            .to(Animals::Table, Animals::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_adopter")
                            .from(Applications::Table, Applications::AdopterId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_deleted_at")
                    .table(Applications::Table)
                    .col(Applications::DeletedAt)
                    .to_owned(),
            )
            .await?;

        // Index for the duplicate-application lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_animal_adopter")
                    .table(Applications::Table)
                    .col(Applications::AnimalId)
                    .col(Applications::AdopterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    AnimalId,
    AdopterId,
    Reason,
    Status,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    DeletedAt,
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
