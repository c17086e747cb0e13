//! SQLite persistence layer for Creamline.
//!
//! This crate provides async database operations for the storefront:
//! subscriptions, delivery records, CMS settings, contact submissions, and
//! the users/products/sessions they reference, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{contact_submission, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:creamline.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let inbox = contact_submission::list_submissions(db.pool()).await?;
//!     println!("{} messages waiting", inbox.len());
//!
//!     Ok(())
//! }
//! ```

pub mod contact_submission;
pub mod delivery;
pub mod error;
pub mod models;
pub mod product;
pub mod seed;
pub mod session;
pub mod settings;
pub mod subscription;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    AboutSettings, ContactSettings, ContactSubmission, PolicySettings, Product, Session,
    Subscription, SubscriptionDelivery, SubscriptionStatus, User,
};
pub use settings::PolicyKind;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/creamline.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// In-memory database with migrations applied.
    ///
    /// Pool size 1 so every statement sees the same `:memory:` connection.
    pub async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::test_db;
    use super::*;
    use crate::user::NewUser;

    #[tokio::test]
    async fn test_user_crud() {
        let db = test_db().await;

        // Create
        let user = NewUser {
            id: "user-test-1".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Ames".to_string(),
            role: "customer".to_string(),
            phone: None,
            wallet_balance: "0".to_string(),
        };
        user::create_user(db.pool(), &user).await.unwrap();

        // Read
        let fetched = user::get_user(db.pool(), "user-test-1").await.unwrap();
        assert_eq!(fetched.first_name, "Alice");
        assert_eq!(fetched.role, "customer");

        // List
        let users = user::list_users(db.pool()).await.unwrap();
        assert_eq!(users.len(), 1);

        // Duplicate id rejected
        let result = user::create_user(db.pool(), &user).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));

        // Missing id
        let result = user::get_user(db.pool(), "nope").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
