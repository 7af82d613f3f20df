//! Catalog business logic - Motorcycle management and seeding.
//!
//! Writes go through [`NewMotorcycle::validate`], which rejects negative stock with
//! [`Error::NegativeQuantity`] before the database is touched. The `motorcycles` table
//! enforces the same quantity rule with a `CHECK` constraint for writes that bypass it.

use crate::{
    core::validation::{MAX_CATALOG_TEXT_LEN, non_negative_quantity, require_text, valid_price},
    entities::{Cylinders, Motorcycle, MotorcycleCategory, motorcycle},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Writable fields of a motorcycle, as received from a client or from config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMotorcycle {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub engine_size: f64,
    pub number_of_cylinders: Cylinders,
    #[serde(default)]
    pub horse_power: i32,
    pub motorcycle_category: MotorcycleCategory,
    #[serde(default)]
    pub weight: i32,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
}

impl NewMotorcycle {
    /// Checks the fields and returns a copy with trimmed text.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The quantity is negative (`NegativeQuantity`)
    /// - The brand or model is empty (`MissingRequiredField`) or longer than 50 characters
    /// - The price is negative or not finite, or the engine size is not finite
    pub fn validate(&self) -> Result<Self> {
        non_negative_quantity(self.quantity)?;
        let brand = require_text("brand", &self.brand, MAX_CATALOG_TEXT_LEN)?;
        let model = require_text("model", &self.model, MAX_CATALOG_TEXT_LEN)?;
        valid_price("price", self.price)?;
        if !self.engine_size.is_finite() {
            return Err(Error::InvalidField {
                field: "engine_size",
                message: format!("must be a finite number (got {})", self.engine_size),
            });
        }
        Ok(Self {
            brand,
            model,
            ..self.clone()
        })
    }

    fn apply(self, active: &mut motorcycle::ActiveModel) {
        active.brand = Set(self.brand);
        active.model = Set(self.model);
        active.engine_size = Set(self.engine_size);
        active.number_of_cylinders = Set(self.number_of_cylinders);
        active.horse_power = Set(self.horse_power);
        active.motorcycle_category = Set(self.motorcycle_category);
        active.weight = Set(self.weight);
        active.year = Set(self.year);
        active.price = Set(self.price);
        active.quantity = Set(self.quantity);
    }
}

/// Adds a motorcycle to the catalog.
#[instrument(skip(db, new), fields(brand = %new.brand, model = %new.model))]
pub async fn create_motorcycle<C>(db: &C, new: &NewMotorcycle) -> Result<motorcycle::Model>
where
    C: ConnectionTrait,
{
    let new = new.validate()?;
    let mut active = motorcycle::ActiveModel {
        ..Default::default()
    };
    new.apply(&mut active);
    let created = active.insert(db).await?;
    info!("Added motorcycle {} '{}'", created.id, created);
    Ok(created)
}

pub async fn get_motorcycle(
    db: &DatabaseConnection,
    motorcycle_id: i64,
) -> Result<Option<motorcycle::Model>> {
    Motorcycle::find_by_id(motorcycle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the catalog ordered by brand, then model.
pub async fn list_motorcycles(db: &DatabaseConnection) -> Result<Vec<motorcycle::Model>> {
    Motorcycle::find()
        .order_by_asc(motorcycle::Column::Brand)
        .order_by_asc(motorcycle::Column::Model)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn count_motorcycles(db: &DatabaseConnection) -> Result<u64> {
    Motorcycle::find().count(db).await.map_err(Into::into)
}

/// Replaces every writable field of a motorcycle.
///
/// Line items keep the price they were created with, so repricing never changes
/// existing invoice totals.
#[instrument(skip(db, changes))]
pub async fn update_motorcycle(
    db: &DatabaseConnection,
    motorcycle_id: i64,
    changes: &NewMotorcycle,
) -> Result<motorcycle::Model> {
    let changes = changes.validate()?;
    let mut active: motorcycle::ActiveModel = get_motorcycle(db, motorcycle_id)
        .await?
        .ok_or_else(|| Error::not_found("Motorcycle", motorcycle_id))?
        .into();
    changes.apply(&mut active);
    let updated = active.update(db).await?;
    info!("Updated motorcycle {}", updated.id);
    Ok(updated)
}

/// Removes a motorcycle together with every invoice line that references it.
#[instrument(skip(db))]
pub async fn delete_motorcycle(db: &DatabaseConnection, motorcycle_id: i64) -> Result<()> {
    let result = Motorcycle::delete_by_id(motorcycle_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Motorcycle", motorcycle_id));
    }
    info!("Deleted motorcycle {}", motorcycle_id);
    Ok(())
}

/// Seeds the catalog when it is empty. Returns how many motorcycles were inserted.
///
/// All entries are validated and inserted in one transaction, so an invalid entry leaves
/// the catalog untouched.
#[instrument(skip(db, entries), fields(entries = entries.len()))]
pub async fn seed_catalog(db: &DatabaseConnection, entries: &[NewMotorcycle]) -> Result<usize> {
    let existing = count_motorcycles(db).await?;
    if existing > 0 {
        info!("Catalog already holds {} motorcycles, skipping seed.", existing);
        return Ok(0);
    }

    let txn = db.begin().await?;
    for entry in entries {
        create_motorcycle(&txn, entry).await?;
    }
    txn.commit().await?;

    info!("Seeded catalog with {} motorcycles.", entries.len());
    Ok(entries.len())
}
