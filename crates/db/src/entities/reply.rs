//! Thread reply entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reply")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Thread this reply belongs to.
    #[sea_orm(indexed)]
    pub thread_id: String,

    /// Author user ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Author username (denormalized for display).
    pub author_name: String,

    /// Author avatar URL (denormalized for display).
    #[sea_orm(nullable)]
    pub author_avatar: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Attached image URL, if any.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Signed vote aggregate: sum of +1/-1 ledger contributions.
    #[sea_orm(default_value = 0)]
    pub votes: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::thread::Entity",
        from = "Column::ThreadId",
        to = "super::thread::Column::Id",
        on_delete = "Cascade"
    )]
    Thread,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
