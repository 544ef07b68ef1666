//! Discussion thread entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Author username (denormalized for display).
    pub author_name: String,

    /// Author avatar URL (denormalized for display).
    #[sea_orm(nullable)]
    pub author_avatar: Option<String>,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Attached image URL, if any.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// View count (bumped on every thread open).
    #[sea_orm(default_value = 0)]
    pub views: i64,

    /// Signed vote aggregate: sum of +1/-1 ledger contributions.
    /// No lower bound.
    #[sea_orm(default_value = 0)]
    pub votes: i64,

    /// Reply count (denormalized).
    #[sea_orm(default_value = 0)]
    pub reply_count: i32,

    /// Trending score (bumped by 2 on every thread open).
    #[sea_orm(default_value = 0)]
    pub trending_score: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,

    /// Last time a reply was posted.
    #[sea_orm(nullable)]
    pub last_replied_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::reply::Entity")]
    Replies,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
