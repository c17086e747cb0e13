//! Error surface for the store.
//!
//! Every module in this crate returns the same [`DatabaseError`]. Row
//! lookups fail with `NotFound` carrying the entity name the API layer
//! echoes back ("Subscription", "Contact submission", ...). Writes that
//! trip a unique constraint, such as a duplicate user email, surface as
//! `AlreadyExists`. `MissingField` covers required-input checks that run
//! before anything touches the pool.

use thiserror::Error;

/// Errors produced by the persistence layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx failure: connection, query, pool acquire.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failure at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No row with the given id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Unique-constraint conflict on insert.
    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    /// A required input field was blank or absent.
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
