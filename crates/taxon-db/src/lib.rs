//! # taxon-db
//!
//! Index store implementations for the taxon engine.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgIndexStore`], a PostgreSQL-backed [`IndexStore`]
//! - [`MemoryIndexStore`], an in-memory ordered multi-map
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use taxon_db::{Database, IndexStore, SortKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/taxon").await?;
//!     db.migrate().await?;
//!
//!     db.entries
//!         .save("tags", "/posts/hello.html", "rust", &SortKey::from_unix_seconds(1_700_000_000))
//!         .await?;
//!     Ok(())
//! }
//! ```
pub mod entries;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
pub mod test_fixtures;

// Re-export core types
pub use taxon_core::*;

pub use entries::PgIndexStore;
pub use memory::MemoryIndexStore;
pub use pool::{create_pool, log_pool_metrics, PoolConfig};

/// Database context with the index store.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Taxonomy index entries.
    pub entries: PgIndexStore,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            entries: PgIndexStore::new(pool.clone()),
            pool,
        }
    }

    /// Connect with pool settings taken from the environment.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, PoolConfig::from_env()).await
    }

    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
