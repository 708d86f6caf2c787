//! Guest user entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A cookie-carried pseudo-identity without credentials.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guest_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,

    #[sea_orm(default_value = false)]
    pub banned: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::confession::Entity")]
    Confessions,
}

impl Related<super::confession::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
