//! Community post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Community this post belongs to.
    #[sea_orm(indexed)]
    pub community_id: String,

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

    /// Upvote count. Never below 0.
    #[sea_orm(default_value = 0)]
    pub upvotes: i64,

    /// Downvote count. Never below 0.
    #[sea_orm(default_value = 0)]
    pub downvotes: i64,

    /// View count.
    #[sea_orm(default_value = 0)]
    pub views: i64,

    /// Comment count (denormalized).
    #[sea_orm(default_value = 0)]
    pub comment_count: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::community::Entity",
        from = "Column::CommunityId",
        to = "super::community::Column::Id",
        on_delete = "Cascade"
    )]
    Community,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
