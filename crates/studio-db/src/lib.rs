//! SQLite record store for the Lumina glass studio.
//!
//! This crate provides a [`RecordStore`] backed by SQLx with SQLite, so the
//! studio keeps its users, history and community posts across restarts.
//!
//! # Example
//!
//! ```no_run
//! use studio_db::StudioDb;
//! use studio_core::RecordStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = StudioDb::connect("sqlite:studio.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let posts = db.list("community_posts").await?;
//!     println!("{} posts", posts.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod records;

pub use error::{DatabaseError, Result};

use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use studio_core::{async_trait, RecordStore, StudioError};

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct StudioDb {
    pool: SqlitePool,
}

impl StudioDb {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

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

    /// Open a migrated in-memory database.
    ///
    /// Each SQLite connection has its own in-memory database, so the pool
    /// holds exactly one connection.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
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

#[async_trait]
impl RecordStore for StudioDb {
    async fn get(&self, collection: &str, id: &str) -> std::result::Result<Option<Value>, StudioError> {
        Ok(records::get_record(&self.pool, collection, id).await?)
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> std::result::Result<(), StudioError> {
        Ok(records::put_record(&self.pool, collection, id, &record).await?)
    }

    async fn delete(&self, collection: &str, id: &str) -> std::result::Result<bool, StudioError> {
        Ok(records::delete_record(&self.pool, collection, id).await?)
    }

    async fn list(&self, collection: &str) -> std::result::Result<Vec<Value>, StudioError> {
        Ok(records::list_records(&self.pool, collection).await?)
    }

    async fn clear(&self, collection: &str) -> std::result::Result<(), StudioError> {
        records::clear_collection(&self.pool, collection).await?;
        Ok(())
    }
}
