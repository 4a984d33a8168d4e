//! # Quote Command
//!
//! Applies the job flags to the session and prints the price.

use std::io::Write;

use chrono::NaiveDateTime;
use haul_core::summary::format_multiplier;
use haul_core::validation::{coerce_count, coerce_number};
use haul_core::{render_quote_text, QuoteBreakdown, QuoteRequest};
use serde::Serialize;
use tracing::debug;

use crate::cli::QuoteArgs;
use crate::error::{CliError, CliResult};
use crate::state::QuoteSession;

/// `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOutput<'a> {
    request: &'a QuoteRequest,
    breakdown: &'a QuoteBreakdown,
}

/// Prices the job described by `args`.
pub fn execute<W: Write>(
    session: &mut QuoteSession,
    args: &QuoteArgs,
    issued_at: NaiveDateTime,
    out: &mut W,
) -> CliResult<()> {
    session.update_request(|req| {
        if let Some(raw) = &args.distance {
            req.set_distance_km(coerce_number(raw));
        }
        if let Some(raw) = &args.floors {
            req.floors = coerce_count(raw);
        }
        if args.no_elevator {
            req.has_elevator = false;
        }
        if let Some(raw) = &args.helpers {
            req.helpers = coerce_count(raw);
        }
        req.weekend = args.weekend;
    });

    for raw in &args.items {
        let (id, qty) = parse_item_arg(raw)?;
        session.set_quantity(id, qty)?;
    }

    debug!(total = session.breakdown().total.units(), "Quote priced");

    if args.json {
        let output = QuoteOutput {
            request: session.request(),
            breakdown: session.breakdown(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else if args.summary {
        let text = render_quote_text(
            session.config(),
            session.request(),
            session.breakdown(),
            issued_at,
        );
        writeln!(out, "{}", text)?;
    } else {
        write!(out, "{}", render_breakdown(session.breakdown()))?;
    }

    Ok(())
}

/// Splits `ID=QTY`. The quantity is coerced; the id must be present.
fn parse_item_arg(raw: &str) -> CliResult<(&str, u32)> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| CliError::validation(format!("Expected ID=QTY, got '{}'", raw)))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::validation(format!("Missing item id in '{}'", raw)));
    }

    Ok((id, coerce_count(qty)))
}

/// Itemized price lines, one per charge.
fn render_breakdown(b: &QuoteBreakdown) -> String {
    let rows = [
        ("기본요금", format!("{}원", b.base_fee)),
        ("품목 추가합", format!("{}원", b.items_subtotal)),
        ("거리 추가", format!("{}원", b.distance_surcharge)),
        ("층수 추가(무엘리베이터)", format!("{}원", b.floor_surcharge)),
        ("보조 인력", format!("{}원", b.helper_surcharge)),
        ("소계", format!("{}원", b.subtotal)),
        ("주말/야간 가중치", format_multiplier(b.weekend_multiplier)),
        ("고객 결제 예상", format!("{}원", b.total)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use haul_core::RateConfig;

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn run(args: QuoteArgs) -> (QuoteSession, CliResult<()>, String) {
        let mut session = QuoteSession::new(RateConfig::default());
        let mut out = Vec::new();
        let result = execute(&mut session, &args, issued_at(), &mut out);
        (session, result, String::from_utf8(out).unwrap())
    }

    fn weekend_args() -> QuoteArgs {
        QuoteArgs {
            distance: Some("20".to_string()),
            floors: Some("3".to_string()),
            no_elevator: true,
            helpers: Some("1".to_string()),
            weekend: true,
            items: vec!["fridge=2".to_string()],
            ..QuoteArgs::default()
        }
    }

    #[test]
    fn test_breakdown_output() {
        let (_, result, out) = run(weekend_args());
        result.unwrap();

        assert!(out.contains("기본요금: 120,000원\n"));
        assert!(out.contains("거리 추가: 10,000원\n"));
        assert!(out.contains("층수 추가(무엘리베이터): 15,000원\n"));
        assert!(out.contains("소계: 235,000원\n"));
        assert!(out.contains("주말/야간 가중치: × 1.20\n"));
        assert!(out.contains("고객 결제 예상: 282,000원\n"));
    }

    #[test]
    fn test_defaults_without_flags() {
        let (session, result, out) = run(QuoteArgs::default());
        result.unwrap();

        assert_eq!(session.request().distance_km, 8.0);
        assert!(session.request().has_elevator);
        assert!(out.contains("고객 결제 예상: 120,000원"));
    }

    #[test]
    fn test_garbage_numbers_count_as_zero() {
        let args = QuoteArgs {
            distance: Some("far".to_string()),
            floors: Some("-2".to_string()),
            helpers: Some("".to_string()),
            no_elevator: true,
            ..QuoteArgs::default()
        };
        let (session, result, _) = run(args);
        result.unwrap();

        assert_eq!(session.request().distance_km, 0.0);
        assert_eq!(session.request().floors, 0);
        assert_eq!(session.request().helpers, 0);
        assert_eq!(session.breakdown().total.units(), 120_000);
    }

    #[test]
    fn test_summary_output() {
        let args = QuoteArgs {
            summary: true,
            ..weekend_args()
        };
        let (_, result, out) = run(args);
        result.unwrap();

        assert!(out.starts_with("[가정 대형 폐기물 내림 서비스 견적]\n일시: 2026-10-19 09:00"));
        assert!(out.contains("냉장고(중/대) 2대"));
        assert!(out.contains("예상 결제 금액: 282,000원"));
    }

    #[test]
    fn test_json_output() {
        let args = QuoteArgs {
            json: true,
            ..weekend_args()
        };
        let (_, result, out) = run(args);
        result.unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["breakdown"]["total"], 282_000);
        assert_eq!(value["breakdown"]["subtotal"], 235_000);
        assert_eq!(value["request"]["quantities"]["fridge"], 2);
        assert_eq!(value["request"]["hasElevator"], false);
    }

    #[test]
    fn test_unknown_item_is_an_error() {
        let args = QuoteArgs {
            items: vec!["piano=1".to_string()],
            ..QuoteArgs::default()
        };
        let (_, result, out) = run(args);
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_item_arg() {
        assert_eq!(parse_item_arg("fridge=2").unwrap(), ("fridge", 2));
        assert_eq!(parse_item_arg(" desk = 1.7").unwrap(), ("desk", 1));
        assert_eq!(parse_item_arg("small=lots").unwrap(), ("small", 0));
        assert!(parse_item_arg("fridge").is_err());
        assert!(parse_item_arg("=3").is_err());
    }
}
