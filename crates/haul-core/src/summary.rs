//! # Quote Summary
//!
//! Plain-text quote for pasting into a message to the customer.
//!
//! ```text
//! [가정 대형 폐기물 내림 서비스 견적]
//! 일시: 2026-10-19 14:30
//! 업체: 한빛생활정리
//!
//! 거리(왕복): 20km
//! 층수: 3층 / 엘리베이터 없음
//! 보조 인력: 1명
//! 주말/야간: 적용
//!
//! 품목:
//! 냉장고(중/대) 2대
//!
//! 예상 결제 금액: 282,000원
//! (대형폐기물 스티커 비용 별도)
//! ```

use chrono::NaiveDateTime;

use crate::rate_config::RateConfig;
use crate::types::{QuoteBreakdown, QuoteRequest};

/// Heading on every quote.
pub const QUOTE_TITLE: &str = "[가정 대형 폐기물 내림 서비스 견적]";

/// Closing line on every quote. Municipal sticker fees are paid separately.
pub const STICKER_DISCLAIMER: &str = "(대형폐기물 스티커 비용 별도)";

/// Timestamp format of the `일시` line.
const ISSUED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Weekend factor as shown in a breakdown (`× 1.20`).
pub fn format_multiplier(multiplier: f64) -> String {
    format!("× {:.2}", multiplier)
}

/// Renders the multi-line quote text.
///
/// Only items with a non-zero quantity are listed. Business lines appear
/// only when the field is set. The total and disclaimer lines are always
/// present.
pub fn render_quote_text(
    cfg: &RateConfig,
    req: &QuoteRequest,
    breakdown: &QuoteBreakdown,
    issued_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        QUOTE_TITLE.to_string(),
        format!("일시: {}", issued_at.format(ISSUED_AT_FORMAT)),
    ];

    for (key, value) in [
        ("업체", &cfg.business_name),
        ("연락처", &cfg.business_phone),
        ("이메일", &cfg.business_email),
    ] {
        if !value.trim().is_empty() {
            lines.push(format!("{key}: {value}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("거리(왕복): {}km", req.distance_km));
    lines.push(format!(
        "층수: {}층 / 엘리베이터 {}",
        req.floors,
        if req.has_elevator { "있음" } else { "없음" }
    ));
    lines.push(format!("보조 인력: {}명", req.helpers));
    lines.push(format!(
        "주말/야간: {}",
        if req.weekend { "적용" } else { "미적용" }
    ));
    lines.push(String::new());

    let item_lines: Vec<String> = cfg
        .items
        .iter()
        .filter_map(|item| {
            let qty = req.quantity(&item.id);
            (qty > 0).then(|| format!("{} {}{}", item.label, qty, item.unit_label))
        })
        .collect();

    if item_lines.is_empty() {
        lines.push("품목: 없음".to_string());
    } else {
        lines.push("품목:".to_string());
        lines.extend(item_lines);
    }

    lines.push(String::new());
    lines.push(format!("예상 결제 금액: {}원", breakdown.total));
    lines.push(STICKER_DISCLAIMER.to_string());

    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::pricing::price;
    use crate::types::LineItem;
    use chrono::NaiveDate;

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn chair_config() -> RateConfig {
        let mut cfg = RateConfig::default();
        cfg.business_name = "테스트".to_string();
        cfg.business_phone = "010-0000-0000".to_string();
        cfg.business_email = "a@b.c".to_string();
        cfg.set_items(vec![
            LineItem::new("x", "의자", Money::from_units(5_000), "개"),
            LineItem::new("y", "식탁", Money::from_units(10_000), "개"),
        ]);
        cfg
    }

    #[test]
    fn test_lists_only_non_zero_items() {
        let cfg = chair_config();
        let mut req = QuoteRequest::for_items(&cfg.items);
        req.quantities.insert("x".to_string(), 2);

        let text = render_quote_text(&cfg, &req, &price(&cfg, &req), issued_at());
        assert!(text.contains("품목:\n의자 2개"));
        assert!(!text.contains("식탁"));
    }

    #[test]
    fn test_full_layout() {
        let cfg = chair_config();
        let mut req = QuoteRequest::for_items(&cfg.items);
        req.distance_km = 12.0;
        req.floors = 3;
        req.has_elevator = false;
        req.helpers = 1;
        req.weekend = true;
        req.quantities.insert("x".to_string(), 2);

        let breakdown = price(&cfg, &req);
        let text = render_quote_text(&cfg, &req, &breakdown, issued_at());

        let expected = [
            "[가정 대형 폐기물 내림 서비스 견적]",
            "일시: 2026-10-19 14:30",
            "업체: 테스트",
            "연락처: 010-0000-0000",
            "이메일: a@b.c",
            "",
            "거리(왕복): 12km",
            "층수: 3층 / 엘리베이터 없음",
            "보조 인력: 1명",
            "주말/야간: 적용",
            "",
            "품목:",
            "의자 2개",
            "",
            &format!("예상 결제 금액: {}원", breakdown.total),
            "(대형폐기물 스티커 비용 별도)",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_items_and_no_business_info() {
        let mut cfg = chair_config();
        cfg.business_name.clear();
        cfg.business_phone.clear();
        cfg.business_email.clear();
        let req = QuoteRequest::for_items(&cfg.items);

        let text = render_quote_text(&cfg, &req, &price(&cfg, &req), issued_at());
        assert!(text.contains("품목: 없음"));
        assert!(!text.contains("업체:"));
        assert!(!text.contains("연락처:"));
        assert!(!text.contains("이메일:"));
        assert!(text.contains("엘리베이터 있음"));
        assert!(text.contains("주말/야간: 미적용"));
        assert!(text.contains("예상 결제 금액: 120,000원"));
        assert!(text.ends_with(STICKER_DISCLAIMER));
    }

    #[test]
    fn test_format_multiplier() {
        assert_eq!(format_multiplier(1.0), "× 1.00");
        assert_eq!(format_multiplier(1.2), "× 1.20");
        assert_eq!(format_multiplier(1.333), "× 1.33");
    }

    #[test]
    fn test_fractional_distance_keeps_decimals() {
        let cfg = chair_config();
        let mut req = QuoteRequest::for_items(&cfg.items);
        req.distance_km = 12.5;

        let text = render_quote_text(&cfg, &req, &price(&cfg, &req), issued_at());
        assert!(text.contains("거리(왕복): 12.5km"));
    }
}
