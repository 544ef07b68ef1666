//! Poll vote entity for tracking voter choices.
//!
//! Unlike the write-once thread/post ledger, a poll vote row is mutable:
//! switching options updates `choice` in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll_vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Poll voted on.
    #[sea_orm(indexed)]
    pub poll_id: String,

    /// Voter identity: a user ID or a `guest-` pseudo-identity.
    #[sea_orm(indexed)]
    pub voter_id: String,

    /// Chosen option index (0-based).
    pub choice: i32,

    pub created_at: DateTimeWithTimeZone,

    /// Set when the voter switches options.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::poll::Entity",
        from = "Column::PollId",
        to = "super::poll::Column::Id",
        on_delete = "Cascade"
    )]
    Poll,
}

impl Related<super::poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
