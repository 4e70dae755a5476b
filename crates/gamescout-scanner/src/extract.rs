//! Recovery of the structured payload from free-form model text.
//!
//! The model is asked for a bare JSON object but routinely wraps it in
//! markdown fences or surrounds it with prose. Strategies run in order and
//! the first one that yields an object wins; if none does the caller falls
//! back to an empty result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").expect("valid code fence regex"));

/// Parser attempts, tried in order.
const STRATEGIES: &[(&str, fn(&str) -> Option<ScanPayload>)] =
    &[("direct", parse_direct), ("braced", parse_braced)];

/// The object the prompt asks for, before any normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPayload {
    pub deals: Vec<RawDeal>,
    /// `None` when absent, not a string, or blank.
    pub summary: Option<String>,
}

/// One entry of the `deals` array as the model wrote it.
///
/// Text fields accept strings or bare numbers; missing fields become empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(default, deserialize_with = "lenient_string")]
    pub store: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub edition: String,
    #[serde(default, alias = "current_price", deserialize_with = "lenient_string")]
    pub current_price: String,
    #[serde(default, alias = "original_price", deserialize_with = "lenient_string")]
    pub original_price: String,
    /// Kept raw: the model sends `40`, `40.5`, `"40%"`, or nothing.
    #[serde(default, alias = "discount_percent")]
    pub discount_percent: Option<Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    })
}

/// Removes markdown code-fence markers and surrounding whitespace.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Runs every strategy against the fence-stripped text and returns the first
/// payload recovered, or `None` if the text holds no usable JSON object.
#[must_use]
pub fn extract_payload(raw: &str) -> Option<ScanPayload> {
    let cleaned = strip_code_fences(raw);
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let payload = strategy(&cleaned)?;
        tracing::debug!(
            strategy = *name,
            deals = payload.deals.len(),
            "recovered model payload"
        );
        Some(payload)
    })
}

/// Parses the whole text as a JSON object.
fn parse_direct(text: &str) -> Option<ScanPayload> {
    let value = serde_json::from_str::<Value>(text).ok()?;
    payload_from_value(&value)
}

/// Parses the span from the first `{` to the last `}` inclusive.
fn parse_braced(text: &str) -> Option<ScanPayload> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    parse_direct(&text[start..=end])
}

/// Builds a payload from any JSON object. Deal entries that are not objects
/// are skipped with a warning rather than discarding the whole payload.
fn payload_from_value(value: &Value) -> Option<ScanPayload> {
    let object = value.as_object()?;

    let deals = object
        .get("deals")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    match serde_json::from_value::<RawDeal>(entry.clone()) {
                        Ok(deal) => Some(deal),
                        Err(e) => {
                            tracing::warn!(index, error = %e, "skipping malformed deal entry");
                            None
                        }
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned);

    Some(ScanPayload { deals, summary })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
