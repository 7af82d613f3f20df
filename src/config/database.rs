//! Database configuration module for motoshop.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! which also emits the `ON DELETE CASCADE` foreign keys declared on the relations. Tables
//! are created parents first so that every foreign key target already exists.
//!
//! On top of the generated definitions, a few invariants are enforced as `CHECK`
//! constraints so that they hold for every write, not only for the ones that go through
//! `core`: stock and line quantities are never negative, and a stored password is either
//! absent or an Argon2 hash.

use crate::entities::{
    AuthToken, Invoice, InvoiceItem, Motorcycle, ProfileFeedItem, UserProfile, invoice_item,
    motorcycle, user_profile,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    sea_query::{Expr, SimpleExpr},
};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/motoshop.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file under `data/` if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
    checks: Vec<SimpleExpr>,
) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    for check in checks {
        statement.check(check);
    }
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

fn hashed_password_check() -> SimpleExpr {
    let prefix = format!("{}%", user_profile::PASSWORD_HASH_PREFIX);
    Expr::col(user_profile::Column::Password)
        .is_null()
        .or(Expr::col(user_profile::Column::Password).like(prefix.as_str()))
}

/// Creates every table that does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, UserProfile, vec![hashed_password_check()]).await?;
    create_table(db, &schema, AuthToken, vec![]).await?;
    create_table(db, &schema, ProfileFeedItem, vec![]).await?;
    create_table(
        db,
        &schema,
        Motorcycle,
        vec![Expr::col(motorcycle::Column::Quantity).gte(0)],
    )
    .await?;
    create_table(db, &schema, Invoice, vec![]).await?;
    create_table(
        db,
        &schema,
        InvoiceItem,
        vec![Expr::col(invoice_item::Column::Quantity).gte(0)],
    )
    .await?;

    info!("Database tables ensured.");
    Ok(())
}
