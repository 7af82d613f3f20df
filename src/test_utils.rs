//! Shared test utilities for motoshop.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        catalog::{self, NewMotorcycle},
        invoice,
        invoice_item::{self, NewInvoiceItem},
        profile,
    },
    entities::{self, Cylinders, MotorcycleCategory},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Password given to every profile created by [`create_test_profile`].
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a regular profile named "Test Rider" with [`TEST_PASSWORD`].
pub async fn create_test_profile(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user_profile::Model> {
    profile::create_user(db, email, "Test Rider", Some(TEST_PASSWORD)).await
}

/// A valid catalog entry.
///
/// # Defaults
/// * 650cc, two cylinders, street category
/// * `price`: 5000.0
/// * `quantity`: 1
#[must_use]
pub fn sample_motorcycle(brand: &str, model: &str) -> NewMotorcycle {
    NewMotorcycle {
        brand: brand.to_string(),
        model: model.to_string(),
        engine_size: 650.0,
        number_of_cylinders: Cylinders::Two,
        horse_power: 70,
        motorcycle_category: MotorcycleCategory::Street,
        weight: 200,
        year: 2024,
        price: 5_000.0,
        quantity: 1,
    }
}

/// Creates a motorcycle with a custom price and stock.
pub async fn create_test_motorcycle(
    db: &DatabaseConnection,
    brand: &str,
    price: f64,
    quantity: i32,
) -> Result<entities::motorcycle::Model> {
    let mut new = sample_motorcycle(brand, "Test Model");
    new.price = price;
    new.quantity = quantity;
    catalog::create_motorcycle(db, &new).await
}

/// Adds a line with an explicit unit price.
pub async fn add_test_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    product_id: i64,
    quantity: i32,
    price: f64,
) -> Result<entities::invoice_item::Model> {
    invoice_item::create_invoice_item(
        db,
        &NewInvoiceItem {
            invoice_id,
            product_id,
            quantity,
            price: Some(price),
        },
    )
    .await
}

/// Adds a line priced from the catalog.
pub async fn create_invoice_item_at_catalog_price(
    db: &DatabaseConnection,
    invoice_id: i64,
    product_id: i64,
    quantity: i32,
) -> Result<entities::invoice_item::Model> {
    invoice_item::create_invoice_item(
        db,
        &NewInvoiceItem {
            invoice_id,
            product_id,
            quantity,
            price: None,
        },
    )
    .await
}

/// Sets up a client, a motorcycle and an empty invoice for that client.
/// Returns (db, client, motorcycle, invoice) for invoice-related tests.
pub async fn setup_with_invoice() -> Result<(
    DatabaseConnection,
    entities::user_profile::Model,
    entities::motorcycle::Model,
    entities::invoice::Model,
)> {
    let db = setup_test_db().await?;
    let client = create_test_profile(&db, "client@example.com").await?;
    let motorcycle = create_test_motorcycle(&db, "Triumph", 11_500.0, 5).await?;
    let invoice = invoice::create_invoice(&db, client.id).await?;
    Ok((db, client, motorcycle, invoice))
}
