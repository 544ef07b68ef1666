//! Vote ledger entity for threads, replies, and community posts.
//!
//! One row per (voter, target) pair. Rows are write-once: a second vote
//! from the same voter on the same item is rejected, including attempts
//! to flip the direction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of item a ledger entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[sea_orm(string_value = "thread")]
    Thread,
    #[sea_orm(string_value = "reply")]
    Reply,
    #[sea_orm(string_value = "post")]
    Post,
}

/// Recorded vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    #[sea_orm(string_value = "up")]
    Up,
    #[sea_orm(string_value = "down")]
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Voter identity: a user ID or a `guest-` pseudo-identity.
    #[sea_orm(indexed)]
    pub voter_id: String,

    pub target_kind: TargetKind,

    /// ID of the thread, reply, or post voted on.
    #[sea_orm(indexed)]
    pub target_id: String,

    pub choice: Choice,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
