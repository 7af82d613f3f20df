//! User profile entity - The authenticated identity of the system.
//!
//! Profiles are keyed by a unique email address. The password column only ever holds an
//! Argon2 PHC string, or nothing for profiles without a usable password; the table's
//! `CHECK` constraint refuses anything else. Administrative capabilities are expressed
//! by the profile's [`Role`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix every stored password hash must carry.
pub const PASSWORD_HASH_PREFIX: &str = "$argon2";

/// Capability level of a profile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular profile without administrative rights
    #[default]
    #[sea_orm(string_value = "member")]
    Member,
    /// Staff profile, allowed into administrative tooling
    #[sea_orm(string_value = "staff")]
    Staff,
    /// Superuser, holds every permission
    #[sea_orm(string_value = "superuser")]
    Superuser,
}

/// User profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login identity, domain part stored lower-cased
    #[sea_orm(unique)]
    pub email: String,
    /// Display name
    pub name: String,
    /// Optional last name, empty when not provided
    pub lastname: String,
    /// Argon2 hash of the password; `None` when the profile has no usable password
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Administrative capability level
    pub role: Role,
    /// Inactive profiles cannot log in
    pub is_active: bool,
    /// Last successful login
    pub last_login: Option<DateTimeUtc>,
    /// When the profile was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Whether the profile may access administrative tooling.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff | Role::Superuser)
    }

    #[must_use]
    pub const fn is_superuser(&self) -> bool {
        matches!(self.role, Role::Superuser)
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// Defines relationships between `UserProfile` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One profile has many feed items
    #[sea_orm(has_many = "super::profile_feed_item::Entity")]
    FeedItems,
    /// One profile is the client of many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
    /// One profile has at most one login token
    #[sea_orm(has_one = "super::auth_token::Entity")]
    AuthToken,
}

impl Related<super::profile_feed_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedItems.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::auth_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
