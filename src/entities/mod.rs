//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod auth_token;
pub mod invoice;
pub mod invoice_item;
pub mod motorcycle;
pub mod profile_feed_item;
pub mod user_profile;

// Re-export specific types to avoid conflicts
pub use auth_token::{Column as AuthTokenColumn, Entity as AuthToken, Model as AuthTokenModel};
pub use invoice::{Column as InvoiceColumn, Entity as Invoice, Model as InvoiceModel};
pub use invoice_item::{
    Column as InvoiceItemColumn, Entity as InvoiceItem, Model as InvoiceItemModel,
};
pub use motorcycle::{
    Column as MotorcycleColumn, Cylinders, Entity as Motorcycle, MotorcycleCategory,
    Model as MotorcycleModel,
};
pub use profile_feed_item::{
    Column as ProfileFeedItemColumn, Entity as ProfileFeedItem, Model as ProfileFeedItemModel,
};
pub use user_profile::{
    Column as UserProfileColumn, Entity as UserProfile, Model as UserProfileModel, Role,
};
