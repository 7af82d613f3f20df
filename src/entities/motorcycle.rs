//! Motorcycle entity - The purchasable catalog items.
//!
//! Each motorcycle carries descriptive attributes, a current unit price and the
//! quantity on hand. Line items snapshot the price at the time they are created, so
//! repricing a motorcycle never rewrites existing invoices. Stock can't go below zero;
//! the table carries a `CHECK (quantity >= 0)` constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cylinders a motorcycle engine may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Cylinders {
    #[sea_orm(num_value = 1)]
    #[serde(rename = "1")]
    One,
    #[sea_orm(num_value = 2)]
    #[serde(rename = "2")]
    Two,
    #[sea_orm(num_value = 3)]
    #[serde(rename = "3")]
    Three,
    #[sea_orm(num_value = 4)]
    #[serde(rename = "4")]
    Four,
    #[sea_orm(num_value = 6)]
    #[serde(rename = "6")]
    Six,
}

impl Cylinders {
    /// Number of cylinders as an integer.
    #[must_use]
    pub const fn count(self) -> i32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Six => 6,
        }
    }
}

/// Catalog category, stored as its short code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum MotorcycleCategory {
    #[sea_orm(string_value = "S")]
    #[serde(rename = "S")]
    Scooter,
    #[sea_orm(string_value = "Ch")]
    #[serde(rename = "Ch")]
    Chopper,
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    Cross,
    #[sea_orm(string_value = "D")]
    #[serde(rename = "D")]
    DirtBike,
    #[sea_orm(string_value = "Sp")]
    #[serde(rename = "Sp")]
    Sport,
    #[sea_orm(string_value = "St")]
    #[serde(rename = "St")]
    Street,
    #[sea_orm(string_value = "E")]
    #[serde(rename = "E")]
    Enduro,
    #[sea_orm(string_value = "Tu")]
    #[serde(rename = "Tu")]
    Touring,
    #[sea_orm(string_value = "Tr")]
    #[serde(rename = "Tr")]
    ThreeWheeler,
    #[sea_orm(string_value = "Fr")]
    #[serde(rename = "Fr")]
    FourWheeler,
}

impl MotorcycleCategory {
    /// Human-readable label of the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scooter => "Scooter",
            Self::Chopper => "Chopper",
            Self::Cross => "Cross",
            Self::DirtBike => "Dirt Bike",
            Self::Sport => "Sport",
            Self::Street => "Street",
            Self::Enduro => "Enduro",
            Self::Touring => "Touring",
            Self::ThreeWheeler => "3 Wheeler",
            Self::FourWheeler => "4 Wheeler",
        }
    }
}

/// Motorcycle database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "motorcycles")]
pub struct Model {
    /// Unique identifier for the motorcycle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Manufacturer (e.g., "Honda")
    pub brand: String,
    /// Model name (e.g., "CB500F")
    pub model: String,
    /// Engine displacement
    pub engine_size: f64,
    pub number_of_cylinders: Cylinders,
    pub horse_power: i32,
    pub motorcycle_category: MotorcycleCategory,
    /// Weight in kilograms
    pub weight: i32,
    pub year: i32,
    /// Current unit price in dollars
    pub price: f64,
    /// Units on hand
    pub quantity: i32,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.brand, self.model, self.year)
    }
}

/// Defines relationships between Motorcycle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One motorcycle appears on many invoice lines
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    InvoiceItems,
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
