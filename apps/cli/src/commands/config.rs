//! # Config Commands
//!
//! Show, export, import, reset and edit the rate table.
//!
//! ## Import Safety
//! ```text
//! text ──► RateConfig::import ──┬── Ok  ──► session.replace_config ──► save
//!                               └── Err ──► INVALID_CONFIG, nothing changes
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use haul_core::{RateConfig, RateField};
use haul_db::RateConfigRepository;
use tracing::info;

use super::persist;
use crate::error::CliResult;
use crate::state::QuoteSession;

/// Prints the current rate table.
pub async fn show<W: Write>(
    session: &QuoteSession,
    store: &RateConfigRepository,
    out: &mut W,
) -> CliResult<()> {
    let cfg = session.config();

    writeln!(out, "업체: {}", cfg.business_name)?;
    writeln!(out, "연락처: {}", cfg.business_phone)?;
    writeln!(out, "이메일: {}", cfg.business_email)?;
    writeln!(out)?;

    for field in RateField::ALL {
        writeln!(out, "{} = {}", field.key(), cfg.field_value(field))?;
    }
    writeln!(out)?;

    writeln!(out, "품목 {}개", cfg.items.len())?;
    for item in &cfg.items {
        writeln!(
            out,
            "  {}  {}  {}원/{}",
            item.id, item.label, item.unit_price, item.unit_label
        )?;
    }

    if let Some(saved) = store.last_saved().await? {
        writeln!(out)?;
        writeln!(out, "마지막 저장: {}", saved)?;
    }

    Ok(())
}

/// Writes the rate table as pretty JSON to `output`, or to `out`.
pub fn export<W: Write>(
    session: &QuoteSession,
    output: Option<&Path>,
    out: &mut W,
) -> CliResult<()> {
    let text = session.config().to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))?;
            info!(path = %path.display(), "Rate table exported");
        }
        None => writeln!(out, "{}", text)?,
    }

    Ok(())
}

/// Replaces the rate table with JSON read from `path`, or from `input`.
///
/// Invalid text leaves the session and the store untouched.
pub async fn import<W: Write, R: Read>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    path: Option<&Path>,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            input.read_to_string(&mut text)?;
            text
        }
    };

    let cfg = RateConfig::import(&text)?;
    let item_count = cfg.items.len();

    session.replace_config(cfg);
    persist(store, session.config()).await;

    info!(items = item_count, "Rate table imported");
    writeln!(out, "설정을 가져왔습니다 (품목 {}개).", item_count)?;
    Ok(())
}

/// Restores the built-in sample table.
pub async fn reset<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    out: &mut W,
) -> CliResult<()> {
    session.replace_config(RateConfig::default());
    persist(store, session.config()).await;

    writeln!(out, "기본 설정으로 초기화했습니다.")?;
    Ok(())
}

/// Sets one numeric rate. The value is coerced, never rejected.
pub async fn set<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    field: RateField,
    value: &str,
    out: &mut W,
) -> CliResult<()> {
    session.update_config(|cfg| cfg.set_field(field, value));
    persist(store, session.config()).await;

    writeln!(
        out,
        "{} = {}",
        field.key(),
        session.config().field_value(field)
    )?;
    Ok(())
}

/// Updates the business info fields that were given.
pub async fn biz<W: Write>(
    session: &mut QuoteSession,
    store: &RateConfigRepository,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    out: &mut W,
) -> CliResult<()> {
    session.update_config(|cfg| {
        if let Some(name) = name {
            cfg.business_name = name.trim().to_string();
        }
        if let Some(phone) = phone {
            cfg.business_phone = phone.trim().to_string();
        }
        if let Some(email) = email {
            cfg.business_email = email.trim().to_string();
        }
    });
    persist(store, session.config()).await;

    let cfg = session.config();
    writeln!(out, "업체: {}", cfg.business_name)?;
    writeln!(out, "연락처: {}", cfg.business_phone)?;
    writeln!(out, "이메일: {}", cfg.business_email)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use haul_core::RATE_CONFIG_KEY;
    use haul_db::{Database, DbConfig};

    async fn setup() -> (Database, RateConfigRepository, QuoteSession) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.rate_config(RATE_CONFIG_KEY);
        let session = QuoteSession::new(store.load().await.unwrap());
        (db, store, session)
    }

    #[tokio::test]
    async fn test_show_lists_rates_and_items() {
        let (_db, store, session) = setup().await;
        let mut out = Vec::new();
        show(&session, &store, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("baseFee = 120000"));
        assert!(text.contains("weekendRateMultiplierAdd = 0.2"));
        assert!(text.contains("품목 8개"));
        assert!(text.contains("fridge  냉장고(중/대)  20,000원/대"));
        assert!(!text.contains("마지막 저장"));
    }

    #[tokio::test]
    async fn test_set_persists() {
        let (_db, store, mut session) = setup().await;
        let mut out = Vec::new();
        set(&mut session, &store, RateField::HelperFee, "60000", &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "helperFee = 60000\n");
        assert_eq!(store.load().await.unwrap().helper_fee.value(), 60_000.0);
    }

    #[tokio::test]
    async fn test_import_from_reader() {
        let (_db, store, mut session) = setup().await;
        session.set_quantity("fridge", 2).unwrap();

        let json = r#"{"baseFee":100000,"items":[{"id":"fridge","label":"냉장고","unitPrice":25000,"unitLabel":"대"}]}"#;
        let mut input = json.as_bytes();
        let mut out = Vec::new();
        import(&mut session, &store, None, &mut input, &mut out)
            .await
            .unwrap();

        assert_eq!(session.config().items.len(), 1);
        assert_eq!(session.request().quantity("fridge"), 2);
        assert_eq!(session.breakdown().total.units(), 150_000);
        assert_eq!(store.load().await.unwrap(), *session.config());
    }

    #[tokio::test]
    async fn test_failed_import_changes_nothing() {
        let (_db, store, mut session) = setup().await;
        let before = session.config().clone();

        let mut input = "{ this is not json".as_bytes();
        let mut out = Vec::new();
        let err = import(&mut session, &store, None, &mut input, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidConfig);
        assert_eq!(*session.config(), before);
        assert!(store.last_saved().await.unwrap().is_none());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_ids() {
        let (_db, store, mut session) = setup().await;
        let mut input = r#"{"items":[{"id":"a"},{"id":"a"}]}"#.as_bytes();
        let mut out = Vec::new();

        let err = import(&mut session, &store, None, &mut input, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.config().items.len(), 8);
    }

    #[tokio::test]
    async fn test_export_import_file_round_trip() {
        let (_db, store, mut session) = setup().await;
        session.update_config(|cfg| cfg.set_field(RateField::ExtraPerKm, "1500"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let mut out = Vec::new();
        export(&session, Some(path.as_path()), &mut out).unwrap();
        assert!(out.is_empty());

        let mut other = QuoteSession::new(RateConfig::default());
        let mut no_stdin = std::io::empty();
        import(&mut other, &store, Some(path.as_path()), &mut no_stdin, &mut out)
            .await
            .unwrap();

        assert_eq!(other.config(), session.config());
    }

    #[tokio::test]
    async fn test_export_to_stdout() {
        let (_db, _store, session) = setup().await;
        let mut out = Vec::new();
        export(&session, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(RateConfig::import(&text).unwrap(), *session.config());
    }

    #[tokio::test]
    async fn test_reset_and_biz() {
        let (_db, store, mut session) = setup().await;
        session.set_items(Vec::new());

        let mut out = Vec::new();
        biz(
            &mut session,
            &store,
            Some(" 한빛생활정리 ".to_string()),
            None,
            Some("help@example.com".to_string()),
            &mut out,
        )
        .await
        .unwrap();
        let stored = store.load().await.unwrap();
        assert_eq!(stored.business_name, "한빛생활정리");
        assert_eq!(stored.business_email, "help@example.com");
        assert!(stored.items.is_empty());

        reset(&mut session, &store, &mut out).await.unwrap();
        assert_eq!(store.load().await.unwrap(), RateConfig::default());
        assert_eq!(session.request().quantities.len(), 8);
    }
}
