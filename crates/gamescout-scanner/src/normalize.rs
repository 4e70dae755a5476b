//! Turns raw model text into a [`ScanResult`].
//!
//! Pure apart from the clock, which [`normalize_response_at`] takes as an
//! argument so tests can pin it.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use gamescout_core::{is_zero_cost, Deal, GroundingReference, ScanResult};
use serde_json::Value;

use crate::extract::{extract_payload, RawDeal};
use crate::resolve::{resolve_deal_url, ResolvedUrl};

/// Summary used when the model's JSON carries none.
pub const FALLBACK_SUMMARY: &str = "Prices retrieved successfully.";

/// Summary used when no JSON object could be recovered at all.
pub const UNREADABLE_SUMMARY: &str =
    "The market scan returned results that could not be read. Try checking again.";

/// Display format of [`Deal::last_checked`], e.g. `3:04:05 PM`.
const CHECKED_TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Normalizes a model response using the current local time.
#[must_use]
pub fn normalize_response(
    raw_text: &str,
    references: &[GroundingReference],
    query_title: &str,
) -> ScanResult {
    normalize_response_at(raw_text, references, query_title, &Local::now())
}

/// Normalizes a model response as of `now`.
///
/// Never fails: text without a recoverable JSON object yields no deals and
/// [`UNREADABLE_SUMMARY`]. Deal order follows the model's order.
#[must_use]
pub fn normalize_response_at<Tz>(
    raw_text: &str,
    references: &[GroundingReference],
    query_title: &str,
    now: &DateTime<Tz>,
) -> ScanResult
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(payload) = extract_payload(raw_text) else {
        tracing::warn!(
            text_len = raw_text.len(),
            "model response held no recoverable JSON object"
        );
        return ScanResult {
            deals: Vec::new(),
            summary: UNREADABLE_SUMMARY.to_string(),
        };
    };

    let stamp = now.timestamp_millis();
    let last_checked = now.format(CHECKED_TIME_FORMAT).to_string();

    let deals = payload
        .deals
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize_deal(
                index,
                raw,
                query_title,
                references,
                stamp,
                &last_checked,
            )
        })
        .collect();

    ScanResult {
        deals,
        summary: payload
            .summary
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
    }
}

fn normalize_deal(
    index: usize,
    raw: RawDeal,
    query_title: &str,
    references: &[GroundingReference],
    stamp: i64,
    last_checked: &str,
) -> Deal {
    let discount_percent = normalize_discount(raw.discount_percent.as_ref(), &raw.current_price);

    let url = match resolve_deal_url(&raw.store, &raw.edition, query_title, references) {
        Some(resolved) => {
            let source = match &resolved {
                ResolvedUrl::Grounded(_) => "grounding",
                ResolvedUrl::StoreSearch(_) => "store_search",
                ResolvedUrl::WebSearch(_) => "web_search",
            };
            tracing::debug!(store = %raw.store, source, "resolved deal url");
            Some(resolved.into_url())
        }
        None => None,
    };

    Deal {
        id: format!("deal-{index}-{stamp}"),
        store: raw.store,
        edition: raw.edition,
        current_price: raw.current_price,
        original_price: raw.original_price,
        discount_percent,
        url,
        last_checked: last_checked.to_string(),
    }
}

/// Coerces the model's discount into a whole percent.
///
/// Percent strings are read up to the first non-numeric character, so
/// `"40%"` and `"40% off"` both give 40. A zero-cost price with no nonzero
/// discount is forced to 100; otherwise a missing, unparsable, or zero
/// discount is 0.
#[must_use]
pub fn normalize_discount(raw: Option<&Value>, current_price: &str) -> u8 {
    let explicit = raw
        .and_then(discount_value)
        .map(whole_percent)
        .filter(|percent| *percent > 0);

    match explicit {
        Some(percent) => percent,
        None if is_zero_cost(current_price) => 100,
        None => 0,
    }
}

/// Rounds into `0..=100`. Models sometimes write discounts as negative
/// numbers (`"-40%"`), so the sign is dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_percent(percent: f64) -> u8 {
    percent.abs().round().clamp(0.0, 100.0) as u8
}

fn discount_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    parsed.filter(|d| d.is_finite())
}

/// Parses the numeric prefix of `s`, ignoring leading whitespace.
///
/// The prefix ends at the first character that cannot continue a decimal
/// number, including a second `.`, so `"1.2.3%"` reads as 1.2.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(i, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            '-' | '+' => i != 0,
            _ => true,
        })
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
