//! Create guest users table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuestUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuestUsers::Uuid).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(GuestUsers::Banned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GuestUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuestUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GuestUsers {
    Table,
    Uuid,
    Banned,
    CreatedAt,
}
