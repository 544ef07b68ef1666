//! Feedback/report submission entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of submission this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[sea_orm(string_value = "contact")]
    Contact,
    #[sea_orm(string_value = "report")]
    Report,
    #[sea_orm(string_value = "feedback")]
    Feedback,
}

/// Submission review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub kind: Kind,

    pub subject: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Feedback category, if any.
    #[sea_orm(nullable)]
    pub category: Option<String>,

    /// What is being reported (report submissions only).
    #[sea_orm(nullable)]
    pub report_type: Option<String>,

    /// Report details (report submissions only).
    #[sea_orm(column_type = "Text", nullable)]
    pub report_details: Option<String>,

    /// Submitter-assigned priority.
    pub priority: String,

    /// Submitter user ID; null for anonymous submissions.
    #[sea_orm(nullable, indexed)]
    pub user_id: Option<String>,

    /// Contact email; null for anonymous submissions without one.
    #[sea_orm(nullable)]
    pub email: Option<String>,

    pub status: Status,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
