//! Report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report review status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ReportStatus {
    /// Reports only move out of `pending`, and never back.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

/// Report model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The user who filed the report.
    pub user_id: i32,
    /// The reported confession.
    pub confession_id: i32,
    /// Reason given by the reporter.
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    /// Current review status.
    pub status: ReportStatus,
    /// When the report was filed.
    pub created_at: DateTimeWithTimeZone,
    /// When the status last changed.
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Reporter,

    #[sea_orm(
        belongs_to = "super::confession::Entity",
        from = "Column::ConfessionId",
        to = "super::confession::Column::Id"
    )]
    Confession,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporter.def()
    }
}

impl Related<super::confession::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
