//! # Repository Module
//!
//! Store access for the haul CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.rate_config(key).load() / .save(&cfg) / .reset()           │
//! │       ▼                                                                 │
//! │  RateConfigRepository   ← JSON <-> RateConfig, default on bad data     │
//! │       │                                                                 │
//! │       │  get / put / delete (text)                                      │
//! │       ▼                                                                 │
//! │  KvRepository           ← one row per key in kv_store                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Raw text values by key
//! - [`rate_config::RateConfigRepository`] - The persisted rate table

pub mod kv;
pub mod rate_config;
