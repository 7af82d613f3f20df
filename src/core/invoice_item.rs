//! Invoice item business logic - Priced lines attached to an invoice.
//!
//! A line copies the unit price at creation time: either the price supplied by the
//! caller or the motorcycle's current catalog price. The copy is what invoice totals are
//! computed from.

use crate::{
    core::validation::{non_negative_quantity, valid_price},
    entities::{Invoice, InvoiceItem, Motorcycle, invoice_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A line to add to an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Unit price; defaults to the product's current catalog price
    #[serde(default)]
    pub price: Option<f64>,
}

impl NewInvoiceItem {
    /// # Errors
    /// Returns `NegativeQuantity` for a negative quantity and `InvalidField` for a
    /// negative or non-finite price.
    pub fn validate(&self) -> Result<()> {
        non_negative_quantity(self.quantity)?;
        if let Some(price) = self.price {
            valid_price("price", price)?;
        }
        Ok(())
    }
}

/// Adds a line to an invoice, snapshotting the unit price.
///
/// # Errors
/// Returns an error if:
/// - The quantity is negative or the price invalid
/// - The invoice or the product does not exist (`NotFound`)
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_invoice_item(
    db: &DatabaseConnection,
    new: &NewInvoiceItem,
) -> Result<invoice_item::Model> {
    new.validate()?;

    Invoice::find_by_id(new.invoice_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Invoice", new.invoice_id))?;
    let product = Motorcycle::find_by_id(new.product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Motorcycle", new.product_id))?;

    let item = invoice_item::ActiveModel {
        product_id: Set(product.id),
        invoice_id: Set(new.invoice_id),
        quantity: Set(new.quantity),
        price: Set(new.price.unwrap_or(product.price)),
        ..Default::default()
    };
    let item = item.insert(db).await?;
    info!(
        "Added {} x '{}' at {:.2} to invoice {}",
        item.quantity, product, item.price, item.invoice_id
    );
    Ok(item)
}

pub async fn get_invoice_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<invoice_item::Model>> {
    InvoiceItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the lines of an invoice in insertion order.
pub async fn list_items_for_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Vec<invoice_item::Model>> {
    InvoiceItem::find()
        .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
        .order_by_asc(invoice_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes the quantity of a line. The price snapshot is kept.
#[instrument(skip(db))]
pub async fn update_invoice_item_quantity(
    db: &DatabaseConnection,
    item_id: i64,
    quantity: i32,
) -> Result<invoice_item::Model> {
    non_negative_quantity(quantity)?;
    let mut item: invoice_item::ActiveModel = get_invoice_item(db, item_id)
        .await?
        .ok_or_else(|| Error::not_found("InvoiceItem", item_id))?
        .into();
    item.quantity = Set(quantity);
    item.update(db).await.map_err(Into::into)
}

#[instrument(skip(db))]
pub async fn delete_invoice_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = InvoiceItem::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("InvoiceItem", item_id));
    }
    Ok(())
}
