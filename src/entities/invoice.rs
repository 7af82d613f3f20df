//! Invoice entity - A client's bill, made of invoice items.
//!
//! The invoice row itself only records who was billed and when. Its total is never
//! stored; it is aggregated from the items on every read (see `core::invoice`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Unique identifier for the invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile being billed
    pub client_id: i64,
    /// When the invoice was issued, set once on insert
    pub date: DateTimeUtc,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice belongs to one client profile
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::ClientId",
        to = "super::user_profile::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    /// One invoice owns many items
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    Items,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
