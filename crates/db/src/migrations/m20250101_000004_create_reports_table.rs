//! Create reports table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::UserId).integer().not_null())
                    .col(ColumnDef::new(Reports::ConfessionId).integer().not_null())
                    .col(ColumnDef::new(Reports::Reason).text().not_null())
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Reports::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_user")
                            .from(Reports::Table, Reports::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_confession")
                            .from(Reports::Table, Reports::ConfessionId)
                            .to(Confessions::Table, Confessions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, confession_id) - one report per user per confession
        manager
            .create_index(
                Index::create()
                    .name("idx_report_user_confession")
                    .table(Reports::Table)
                    .col(Reports::UserId)
                    .col(Reports::ConfessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: confession_id (cascade delete lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_confession_id")
                    .table(Reports::Table)
                    .col(Reports::ConfessionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reports {
    Table,
    Id,
    UserId,
    ConfessionId,
    Reason,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Confessions {
    Table,
    Id,
}
