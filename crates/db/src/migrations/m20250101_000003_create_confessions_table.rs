//! Create confessions table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Confessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Confessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Confessions::UserId).integer())
                    .col(ColumnDef::new(Confessions::GuestUuid).uuid())
                    .col(ColumnDef::new(Confessions::Username).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Confessions::Title)
                            .string_len(100)
                            .not_null()
                            .default("Untitled"),
                    )
                    .col(ColumnDef::new(Confessions::Text).text().not_null())
                    .col(
                        ColumnDef::new(Confessions::Anon)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Confessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Confessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Exactly one owner column is set
                    .check(Expr::cust(
                        "(user_id IS NOT NULL AND guest_uuid IS NULL) \
                         OR (user_id IS NULL AND guest_uuid IS NOT NULL)",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_confession_user")
                            .from(Confessions::Table, Confessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_confession_guest_user")
                            .from(Confessions::Table, Confessions::GuestUuid)
                            .to(GuestUsers::Table, GuestUsers::Uuid)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: created_at (newest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_confession_created_at")
                    .table(Confessions::Table)
                    .col(Confessions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_confession_user_id")
                    .table(Confessions::Table)
                    .col(Confessions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Confessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Confessions {
    Table,
    Id,
    UserId,
    GuestUuid,
    Username,
    Title,
    Text,
    Anon,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum GuestUsers {
    Table,
    Uuid,
}
