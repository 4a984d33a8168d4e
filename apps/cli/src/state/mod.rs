//! # State Module
//!
//! What a `haul` run holds in memory.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌────────────────────────────────────┐    │
//! │  │   AppSettings    │        │          QuoteSession              │    │
//! │  │                  │        │                                    │    │
//! │  │  db_path         │──open─►│  RateConfig   (loaded from store)  │    │
//! │  │  config_key      │        │  QuoteRequest (from CLI flags)     │    │
//! │  │                  │        │  QuoteBreakdown (always current)   │    │
//! │  └──────────────────┘        └────────────────────────────────────┘    │
//! │                                                                         │
//! │  One process, one session: no locking needed.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;
mod settings;

pub use session::{ItemPatch, QuoteSession};
pub use settings::{AppSettings, DB_FILE_NAME};
