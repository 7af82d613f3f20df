//! Profile feed item entity - Status updates posted by a profile.
//!
//! `created_on` is set once at insert time and never rewritten.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile feed item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_feed_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile that posted the status
    pub user_profile_id: i64,
    /// Free-text status, at most 255 characters
    pub status_text: String,
    /// When the status was posted
    pub created_on: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each feed item belongs to one profile
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::UserProfileId",
        to = "super::user_profile::Column::Id",
        on_delete = "Cascade"
    )]
    UserProfile,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
