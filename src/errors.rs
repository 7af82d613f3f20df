//! Unified error type for every motoshop operation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid value for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("A record with {field} '{value}' already exists")]
    UniquenessViolation { field: &'static str, value: String },

    #[error("Product quantity can't be negative (got {quantity})")]
    NegativeQuantity { quantity: i32 },

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

}

impl Error {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
