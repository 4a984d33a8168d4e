//! # Rate Config Repository
//!
//! Persists the rate table as one JSON record.
//!
//! ## Load Fallback
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kv_store[key]                                                         │
//! │       │                                                                 │
//! │       ├── no row            ──► RateConfig::default()                  │
//! │       ├── unreadable JSON   ──► RateConfig::default()  + warn!         │
//! │       └── JSON object       ──► parsed table (bad numbers → 0)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! A corrupt row is left in place until the next save overwrites it.

use haul_core::RateConfig;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Repository for the persisted rate table.
#[derive(Debug, Clone)]
pub struct RateConfigRepository {
    kv: KvRepository,
    key: String,
}

impl RateConfigRepository {
    /// Creates a repository for the table stored under `key`.
    pub fn new(kv: KvRepository, key: impl Into<String>) -> Self {
        RateConfigRepository {
            kv,
            key: key.into(),
        }
    }

    /// Storage key of the table.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored table, falling back to the default schedule.
    ///
    /// Only a failing store returns an error; missing or malformed data
    /// yields `RateConfig::default()`.
    pub async fn load(&self) -> DbResult<RateConfig> {
        let Some(text) = self.kv.get(&self.key).await? else {
            debug!(key = %self.key, "No stored rate table, using defaults");
            return Ok(RateConfig::default());
        };

        match RateConfig::parse(&text) {
            Ok(cfg) => {
                debug!(key = %self.key, items = cfg.items.len(), "Loaded rate table");
                Ok(cfg)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored rate table is unreadable, using defaults");
                Ok(RateConfig::default())
            }
        }
    }

    /// Writes the table, replacing what was stored.
    pub async fn save(&self, cfg: &RateConfig) -> DbResult<()> {
        let text = serde_json::to_string(cfg)?;
        self.kv.put(&self.key, &text).await?;

        debug!(key = %self.key, items = cfg.items.len(), "Saved rate table");
        Ok(())
    }

    /// Stores and returns the default schedule.
    pub async fn reset(&self) -> DbResult<RateConfig> {
        let cfg = RateConfig::default();
        self.save(&cfg).await?;
        Ok(cfg)
    }

    /// When the table was last saved (RFC 3339), if ever.
    pub async fn last_saved(&self) -> DbResult<Option<String>> {
        self.kv.updated_at(&self.key).await
    }
}
