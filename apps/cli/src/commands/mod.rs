//! # Command Handlers
//!
//! One module per subcommand group.
//!
//! ```text
//! haul quote ...         ──► quote::execute
//! haul config <action>   ──► config::{show, export, import, reset, set, biz}
//! haul items <action>    ──► items::{list, add, update, remove}
//! ```
//!
//! Handlers write their output to `out` and read pasted input from
//! `input`, so tests can run them against buffers.

pub mod config;
pub mod items;
pub mod quote;

use std::io::{Read, Write};

use chrono::Local;
use haul_core::RateConfig;
use haul_db::RateConfigRepository;
use tracing::warn;

use crate::cli::{Commands, ConfigCommands, ItemsCommands};
use crate::error::CliResult;
use crate::state::QuoteSession;

/// Routes a parsed command to its handler.
pub async fn dispatch<W: Write, R: Read>(
    command: Commands,
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    out: &mut W,
    input: &mut R,
) -> CliResult<()> {
    match command {
        Commands::Quote(args) => {
            quote::execute(session, &args, Local::now().naive_local(), out)
        }
        Commands::Config { action } => match action {
            ConfigCommands::Show => config::show(session, store, out).await,
            ConfigCommands::Export { output } => config::export(session, output.as_deref(), out),
            ConfigCommands::Import { input: path } => {
                config::import(session, store, path.as_deref(), input, out).await
            }
            ConfigCommands::Reset => config::reset(session, store, out).await,
            ConfigCommands::Set { field, value } => {
                config::set(session, store, field.into(), &value, out).await
            }
            ConfigCommands::Biz { name, phone, email } => {
                config::biz(session, store, name, phone, email, out).await
            }
        },
        Commands::Items { action } => match action {
            ItemsCommands::List => items::list(session, out),
            ItemsCommands::Add {
                label,
                price,
                unit,
                id,
            } => items::add(session, store, id, label, price, unit, out).await,
            ItemsCommands::Update {
                id,
                label,
                price,
                unit,
            } => items::update(session, store, &id, label, price, unit, out).await,
            ItemsCommands::Remove { id } => items::remove(session, store, &id, out).await,
        },
    }
}

/// Saves the rate table after an edit.
///
/// A failed write is logged and otherwise ignored: the edit still applies
/// to this run's output.
pub(crate) async fn persist(store: &RateConfigRepository, cfg: &RateConfig) {
    if let Err(e) = store.save(cfg).await {
        warn!(key = store.key(), error = %e, "Failed to save rate table");
    }
}
