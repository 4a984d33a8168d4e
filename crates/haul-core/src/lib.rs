//! # haul-core: Pure Pricing Logic for Haul Quotes
//!
//! This crate prices bulky-waste carry-down jobs. Everything here is a pure
//! function or a plain value type with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Haul Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (haul)                              │   │
//! │  │    quote ──► config show/export/import ──► items add/remove     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteSession                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ haul-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │rate_config│  │ reconcile │  │  pricing  │  │  summary  │  │   │
//! │  │   │RateConfig │  │ quantity  │  │  price()  │  │ quote text│  │   │
//! │  │   │ LineItem  │  │  map sync │  │ Breakdown │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    haul-db (Storage Layer)                      │   │
//! │  │              SQLite key-value store, migrations                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rate, LineItem, QuoteRequest, QuoteBreakdown
//! - [`money`] - Money type in whole won
//! - [`rate_config`] - The operator's pricing schedule and its JSON form
//! - [`reconcile`] - Keeps request quantities in step with the item list
//! - [`pricing`] - The pricing function
//! - [`summary`] - Plain-text quote rendering
//! - [`validation`] - Input coercion and operator-edit checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `price` and `reconcile` are deterministic
//! 2. **No I/O**: storage lives in haul-db, presentation in the app
//! 3. **Round Once**: rate table numbers stay as entered; only the breakdown
//!    lines and the final total are whole won (i64)
//! 4. **Coerce, Don't Fail**: bad numbers become zero; only operator edits
//!    and imports return errors
//!
//! ## Example Usage
//!
//! ```rust
//! use haul_core::{price, QuoteRequest, RateConfig};
//!
//! let cfg = RateConfig::default();
//! let mut req = QuoteRequest::for_items(&cfg.items);
//! req.distance_km = 20.0;
//! req.floors = 3;
//! req.has_elevator = false;
//! req.helpers = 1;
//! req.weekend = true;
//! req.quantities.insert("fridge".to_string(), 2);
//!
//! let breakdown = price(&cfg, &req);
//! assert_eq!(breakdown.subtotal.units(), 235_000);
//! assert_eq!(breakdown.total.units(), 282_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod rate_config;
pub mod reconcile;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use haul_core::Money` instead of
// `use haul_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::price;
pub use rate_config::{RateConfig, RateField};
pub use reconcile::reconcile;
pub use summary::render_quote_text;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key of the persisted rate table.
///
/// The `_v1` suffix is the only schema version there is: a table that no
/// longer parses is replaced by the default schedule.
pub const RATE_CONFIG_KEY: &str = "haul_cfg_v1";

/// Counting word used when an item has no unit label.
pub const DEFAULT_UNIT_LABEL: &str = "개";
