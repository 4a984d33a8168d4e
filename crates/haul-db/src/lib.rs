//! # haul-db: Storage Layer for Haul Quotes
//!
//! Flat key-value persistence on SQLite, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Haul Data Flow                                   │
//! │                                                                         │
//! │  CLI command (config set / items add / quote)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     haul-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │ SqlitePool    │◄───│ KvRepository  │    │ 001_kv_store │  │   │
//! │  │   │               │    │ RateConfigRepo│    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/quote/haul.db (or $HAUL_DB_PATH)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value and rate table repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use haul_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/haul.db")).await?;
//! let repo = db.rate_config(haul_core::RATE_CONFIG_KEY);
//!
//! let mut cfg = repo.load().await?;
//! cfg.base_fee = haul_core::Rate::from_units(130_000);
//! repo.save(&cfg).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, StoreLocation};

// Repository re-exports for convenience
pub use repository::kv::KvRepository;
pub use repository::rate_config::RateConfigRepository;
