//! # Item Commands
//!
//! Operator edits to the line item table. Every successful edit is saved.

use std::io::Write;

use haul_core::validation::coerce_money;
use haul_core::LineItem;
use haul_db::RateConfigRepository;
use tracing::info;

use super::persist;
use crate::error::{CliError, CliResult};
use crate::state::{ItemPatch, QuoteSession};

/// Prints one row per item.
pub fn list<W: Write>(session: &QuoteSession, out: &mut W) -> CliResult<()> {
    let items = &session.config().items;
    if items.is_empty() {
        writeln!(out, "등록된 품목이 없습니다.")?;
        return Ok(());
    }

    for item in items {
        write_item(out, item)?;
    }
    Ok(())
}

/// Appends an item. Omitted fields take the blank-row defaults.
pub async fn add<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    id: Option<String>,
    label: Option<String>,
    price: Option<String>,
    unit: Option<String>,
    out: &mut W,
) -> CliResult<()> {
    let blank = LineItem::blank();
    let item = LineItem::new(
        id.map(|id| id.trim().to_string()).unwrap_or(blank.id),
        label.map(|l| l.trim().to_string()).unwrap_or(blank.label),
        price.as_deref().map(coerce_money).unwrap_or(blank.unit_price),
        unit.map(|u| u.trim().to_string()).unwrap_or(blank.unit_label),
    );

    session.add_item(item.clone())?;
    persist(store, session.config()).await;

    info!(id = %item.id, "Item added");
    write_item(out, &item)
}

/// Changes label, price or unit of an existing item.
pub async fn update<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    id: &str,
    label: Option<String>,
    price: Option<String>,
    unit: Option<String>,
    out: &mut W,
) -> CliResult<()> {
    let patch = ItemPatch {
        label,
        unit_price: price.as_deref().map(coerce_money),
        unit_label: unit,
    };

    session.update_item(id, patch)?;
    persist(store, session.config()).await;

    let item = session
        .config()
        .item(id)
        .ok_or_else(|| CliError::not_found("Item", id))?;
    write_item(out, item)
}

/// Deletes an item and drops its quantity.
pub async fn remove<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    id: &str,
    out: &mut W,
) -> CliResult<()> {
    session.remove_item(id)?;
    persist(store, session.config()).await;

    info!(id, "Item removed");
    writeln!(out, "삭제했습니다: {}", id)?;
    Ok(())
}

fn write_item<W: Write>(out: &mut W, item: &LineItem) -> CliResult<()> {
    writeln!(
        out,
        "{}\t{}\t{}원/{}",
        item.id, item.label, item.unit_price, item.unit_label
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use haul_core::{RateConfig, RATE_CONFIG_KEY};
    use haul_db::{Database, DbConfig};

    async fn setup() -> (Database, RateConfigRepository, QuoteSession) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.rate_config(RATE_CONFIG_KEY);
        let session = QuoteSession::new(RateConfig::default());
        (db, store, session)
    }

    #[tokio::test]
    async fn test_list() {
        let (_db, _store, mut session) = setup().await;
        let mut out = Vec::new();
        list(&session, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert!(text.starts_with("fridge\t냉장고(중/대)\t20,000원/대\n"));

        session.set_items(Vec::new());
        let mut out = Vec::new();
        list(&session, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "등록된 품목이 없습니다.\n");
    }

    #[tokio::test]
    async fn test_add_with_defaults() {
        let (_db, store, mut session) = setup().await;
        let mut out = Vec::new();
        add(&mut session, &store, None, None, None, None, &mut out)
            .await
            .unwrap();

        let added = session.config().items.last().unwrap().clone();
        assert!(added.id.starts_with("itm_"));
        assert_eq!(added.label, "새 품목");
        assert!(added.unit_price.is_zero());
        assert_eq!(added.unit_label, "개");
        assert_eq!(session.request().quantity(&added.id), 0);

        let stored = store.load().await.unwrap();
        assert_eq!(stored.items.len(), 9);
    }

    #[tokio::test]
    async fn test_add_coerces_price() {
        let (_db, store, mut session) = setup().await;
        let mut out = Vec::new();
        add(
            &mut session,
            &store,
            Some("piano".to_string()),
            Some("피아노".to_string()),
            Some("-5000".to_string()),
            Some("대".to_string()),
            &mut out,
        )
        .await
        .unwrap();

        let piano = session.config().item("piano").unwrap();
        assert!(piano.unit_price.is_zero());
        assert_eq!(String::from_utf8(out).unwrap(), "piano\t피아노\t0원/대\n");
    }

    #[tokio::test]
    async fn test_add_duplicate_rejected() {
        let (_db, store, mut session) = setup().await;
        let mut out = Vec::new();
        let err = add(
            &mut session,
            &store,
            Some("fridge".to_string()),
            None,
            None,
            None,
            &mut out,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.config().items.len(), 8);
        assert!(store.last_saved().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_quantity() {
        let (_db, store, mut session) = setup().await;
        session.set_quantity("desk", 2).unwrap();

        let mut out = Vec::new();
        update(
            &mut session,
            &store,
            "desk",
            None,
            Some("12000".to_string()),
            None,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(session.request().quantity("desk"), 2);
        assert_eq!(session.breakdown().items_subtotal.units(), 24_000);
        assert!(String::from_utf8(out).unwrap().contains("12,000원/개"));
        assert_eq!(
            store.load().await.unwrap().item("desk").unwrap().unit_price.units(),
            12_000
        );
    }

    #[tokio::test]
    async fn test_update_and_remove_unknown() {
        let (_db, store, mut session) = setup().await;
        let mut out = Vec::new();

        let err = update(&mut session, &store, "piano", None, None, None, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = remove(&mut session, &store, "piano", &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_remove_drops_quantity() {
        let (_db, store, mut session) = setup().await;
        session.set_quantity("fridge", 2).unwrap();

        let mut out = Vec::new();
        remove(&mut session, &store, "fridge", &mut out).await.unwrap();

        assert!(session.config().item("fridge").is_none());
        assert!(!session.request().quantities.contains_key("fridge"));
        assert!(session.breakdown().items_subtotal.is_zero());
        assert_eq!(store.load().await.unwrap().items.len(), 7);
    }
}
