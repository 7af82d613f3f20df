/// Superuser bootstrap settings from environment variables
pub mod admin;

/// Catalog seed configuration from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
