//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display username.
    pub username: String,

    /// Lowercased username for case-insensitive lookup.
    #[sea_orm(unique, indexed)]
    pub username_lower: String,

    /// Email address, if provided at signup.
    #[sea_orm(nullable, unique)]
    pub email: Option<String>,

    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Opaque API token.
    #[sea_orm(nullable, indexed)]
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Profile image URL.
    #[sea_orm(nullable)]
    pub profile_image: Option<String>,

    /// Short bio shown on the profile page.
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Whether this user can access the admin panel.
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::thread::Entity")]
    Threads,
    #[sea_orm(has_many = "super::community_member::Entity")]
    Memberships,
}

impl Related<super::thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Threads.def()
    }
}

impl Related<super::community_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
