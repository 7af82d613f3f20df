//! Auth token entity - Opaque login tokens, one per profile.
//!
//! A token is handed out by a successful login and later resolved back to its
//! profile. Tokens are deleted together with their owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Auth token database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    /// Random 40 character key, presented by clients
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Owner of the token
    #[sea_orm(unique)]
    pub user_profile_id: i64,
    /// When the token was issued
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each token belongs to one profile
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
