//! Confession entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Identity that owns a confession.
///
/// The table stores this as two nullable columns guarded by a CHECK
/// constraint; exactly one of them is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Registered user id.
    User(i32),
    /// Guest uuid.
    Guest(Uuid),
}

impl Owner {
    /// Split into the `(user_id, guest_uuid)` column pair.
    #[must_use]
    pub const fn into_columns(self) -> (Option<i32>, Option<Uuid>) {
        match self {
            Self::User(id) => (Some(id), None),
            Self::Guest(uuid) => (None, Some(uuid)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "confessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(nullable)]
    pub user_id: Option<i32>,

    #[sea_orm(nullable)]
    pub guest_uuid: Option<Uuid>,

    /// Display name captured at creation time
    pub username: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub text: String,

    #[sea_orm(default_value = false)]
    pub anon: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Owning identity, or `None` if the row violates the ownership invariant.
    #[must_use]
    pub const fn owner(&self) -> Option<Owner> {
        match (self.user_id, self.guest_uuid) {
            (Some(id), None) => Some(Owner::User(id)),
            (None, Some(uuid)) => Some(Owner::Guest(uuid)),
            _ => None,
        }
    }

    /// Whether the given registered user owns this confession.
    #[must_use]
    pub fn is_owned_by_user(&self, user_id: i32) -> bool {
        self.user_id == Some(user_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::guest_user::Entity",
        from = "Column::GuestUuid",
        to = "super::guest_user::Column::Uuid"
    )]
    GuestUser,

    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::guest_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuestUser.def()
    }
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
