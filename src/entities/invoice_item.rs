//! Invoice item entity - One priced quantity of a motorcycle on an invoice.
//!
//! `price` is the unit price captured when the line was created, so later catalog
//! repricing leaves historical totals untouched. Lines disappear with either their
//! invoice or their product, and the table refuses negative quantities.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Motorcycle being sold
    pub product_id: i64,
    /// Invoice this line belongs to
    pub invoice_id: i64,
    /// Units sold
    pub quantity: i32,
    /// Unit price snapshot
    pub price: f64,
}

impl Model {
    /// Line total, `price * quantity`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line references one motorcycle
    #[sea_orm(
        belongs_to = "super::motorcycle::Entity",
        from = "Column::ProductId",
        to = "super::motorcycle::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Each line belongs to one invoice
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id",
        on_delete = "Cascade"
    )]
    Invoice,
}

impl Related<super::motorcycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
