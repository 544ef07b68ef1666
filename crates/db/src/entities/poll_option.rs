//! Poll option entity.
//!
//! Each option is its own row so its vote counter can be bumped with a
//! single atomic UPDATE rather than a fetch-compute-write cycle.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll_option")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Poll this option belongs to.
    #[sea_orm(indexed)]
    pub poll_id: String,

    /// 0-based position within the poll.
    pub idx: i32,

    /// Option label.
    pub text: String,

    /// Vote count. Never below 0.
    #[sea_orm(default_value = 0)]
    pub votes: i32,
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
