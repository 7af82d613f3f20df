//! Core business logic - framework-agnostic operations over a `SeaORM` connection.

/// Login and token authentication
pub mod auth;
/// Motorcycle catalog management and seeding
pub mod catalog;
/// Profile status feed
pub mod feed;
/// Invoices and the invoice total aggregate
pub mod invoice;
/// Invoice line items
pub mod invoice_item;
/// Identity factory and profile management
pub mod profile;
/// Field validation shared by the boundary operations
pub mod validation;
