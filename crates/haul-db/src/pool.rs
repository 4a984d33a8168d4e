//! # Store Handle
//!
//! Opens the SQLite file behind a small sqlx pool.
//!
//! ## Lifecycle of One `haul` Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DbConfig::new(path)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ── open / create file, WAL, migrate        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.rate_config(key) ── load once, save after each edit                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ── checkpoint and release the file                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two operators may run `haul` at once against the same file. WAL lets a
//! quote read while an edit writes, and the busy timeout makes the second
//! writer wait instead of failing with `SQLITE_BUSY`.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::kv::KvRepository;
use crate::repository::rate_config::RateConfigRepository;

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A file on disk, created on first open.
    File(PathBuf),
    /// A private in-memory database, gone when the pool closes.
    Memory,
}

/// How to open the store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/haul.db")
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: StoreLocation,

    /// Default: 2. A run reads one row and writes it back.
    pub max_connections: u32,

    /// How long to wait for a free pooled connection. Default: 10 seconds
    pub acquire_timeout: Duration,

    /// How long SQLite waits on a lock held by another process.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed store at `path`. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: StoreLocation::File(path.into()),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// In-memory store for tests.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the
    /// pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            location: StoreLocation::Memory,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(1),
            run_migrations: true,
        }
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Skips migrations on open (for inspecting an existing file as-is).
    pub fn without_migrations(mut self) -> Self {
        self.run_migrations = false;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            StoreLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            // WAL has no meaning for a memory database
            StoreLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout))
    }
}

/// Open store. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store described by `config`, migrating it unless told not to.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        match &config.location {
            StoreLocation::File(path) => info!(path = %path.display(), "Opening store"),
            StoreLocation::Memory => debug!("Opening in-memory store"),
        }

        // Memory pools must never drop their only connection
        let min_connections = match config.location {
            StoreLocation::Memory => 1,
            StoreLocation::File(_) => 0,
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(min_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    /// Opens (creating if needed) the file at `path` with default settings.
    pub async fn open(path: &Path) -> DbResult<Self> {
        Database::new(DbConfig::new(path)).await
    }

    /// Raw key-value access.
    pub fn kv(&self) -> KvRepository {
        KvRepository::new(self.pool.clone())
    }

    /// The rate table stored under `key`.
    ///
    /// ```rust,ignore
    /// let cfg = db.rate_config(haul_core::RATE_CONFIG_KEY).load().await?;
    /// ```
    pub fn rate_config(&self, key: impl Into<String>) -> RateConfigRepository {
        RateConfigRepository::new(self.kv(), key)
    }

    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Waits for in-flight statements, then closes every connection.
    pub async fn close(&self) {
        debug!("Closing store");
        self.pool.close().await;
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
