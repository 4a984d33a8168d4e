//! # haul CLI
//!
//! Command-line front end for the carry-down quote calculator.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              haul                                       │
//! │                                                                         │
//! │  main.rs ────► parse args, init logging, map errors to exit codes      │
//! │                                                                         │
//! │  lib.rs ─────► open store, load rate table, dispatch                    │
//! │                                                                         │
//! │  cli.rs ─────► clap definitions (quote / config / items)                │
//! │                                                                         │
//! │  commands/ ──► quote::execute, config::*, items::*                      │
//! │                                                                         │
//! │  state/ ─────► AppSettings, QuoteSession                                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────┐  ┌──────────────────────────────────────┐    │
//! │  │   haul-core          │  │   haul-db                            │    │
//! │  │   (Pricing Rules)    │  │   (SQLite key-value store)           │    │
//! │  └──────────────────────┘  └──────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Resolve settings: defaults, then environment, then `--db`
//! 3. Open the store and run migrations
//! 4. Load the rate table (defaults if missing or unreadable)
//! 5. Run the command against a fresh `QuoteSession`

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, Read, Write};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::CliResult;
use haul_db::{Database, DbConfig};
use state::{AppSettings, QuoteSession};

/// Runs one command with settings from the environment and the real
/// stdin/stdout.
pub async fn run(cli: Cli) -> CliResult<()> {
    let settings = AppSettings::from_env();
    let stdout = io::stdout();
    let stdin = io::stdin();

    execute(cli, settings, &mut stdout.lock(), &mut stdin.lock()).await
}

/// Runs one command against explicit settings and streams.
pub async fn execute<W: Write, R: Read>(
    cli: Cli,
    settings: AppSettings,
    out: &mut W,
    input: &mut R,
) -> CliResult<()> {
    let settings = settings.with_db_path(cli.db);
    let db_path = settings.database_path()?;
    debug!(?db_path, key = %settings.config_key, "Settings resolved");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let store = db.rate_config(settings.config_key.as_str());
    let config = store.load().await?;
    info!(items = config.items.len(), "Rate table loaded");

    let mut session = QuoteSession::new(config);
    let result = commands::dispatch(cli.command, &mut session, &store, out, input).await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=haul=trace` - Show trace for haul crates only
/// - Default: warnings, plus INFO from haul crates
///
/// Logs go to stderr; stdout carries only command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,haul=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
