use serde::{Deserialize, Serialize};

/// Discount at or above which a deal is flagged as a mega sale.
pub const MEGA_SALE_THRESHOLD: u8 = 90;

/// Heading shown for a free-key hunt run without a title.
pub const GLOBAL_FREE_KEYS_TITLE: &str = "All Trending Free Games";

/// Quick-search titles offered to the user.
pub const TRENDING_TITLES: &[&str] = &[
    "Elden Ring",
    "Cyberpunk 2077",
    "Baldur's Gate 3",
    "Grand Theft Auto V",
    "The Elder Scrolls Online DLC",
];

/// Which kind of scan the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Current prices for one title across the major storefronts.
    PriceCheck,
    /// Active giveaways, either for one title or globally when the title is blank.
    FreeKeys,
}

impl SearchMode {
    /// Heading for the results of a scan in this mode.
    ///
    /// A free-key hunt without a title is the global trending search.
    #[must_use]
    pub fn display_title(self, title: &str) -> String {
        let trimmed = title.trim();
        match self {
            Self::FreeKeys if trimmed.is_empty() => GLOBAL_FREE_KEYS_TITLE.to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// Evidence link supplied by the model's web grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingReference {
    pub uri: String,
    pub title: String,
}

/// One storefront offer reported by the model, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Unique within one [`ScanResult`]: `deal-{index}-{epoch_millis}`.
    pub id: String,
    pub store: String,
    /// Variant, DLC, or title label, e.g. `"Deluxe Edition"`.
    pub edition: String,
    /// Display price exactly as reported, e.g. `"$29.99"` or `"Free"`.
    pub current_price: String,
    pub original_price: String,
    /// Whole percent in `0..=100`.
    pub discount_percent: u8,
    /// Best-guess storefront link; `None` when nothing could be resolved.
    pub url: Option<String>,
    /// Local wall-clock time the deal was processed, e.g. `"3:04:05 PM"`.
    pub last_checked: String,
}

impl Deal {
    #[must_use]
    pub fn is_sale(&self) -> bool {
        self.discount_percent > 0
    }

    #[must_use]
    pub fn is_mega_sale(&self) -> bool {
        self.discount_percent >= MEGA_SALE_THRESHOLD
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        is_zero_cost(&self.current_price)
    }
}

/// Result of one scan. Replaced wholesale by the next scan, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub deals: Vec<Deal>,
    pub summary: String,
}

impl ScanResult {
    /// Returns `true` if any deal is discounted by 90% or more.
    #[must_use]
    pub fn has_mega_sale(&self) -> bool {
        self.deals.iter().any(Deal::is_mega_sale)
    }

    /// Returns `true` if the result looks like a giveaway hit: the summary
    /// mentions "free" or at least one deal costs nothing.
    #[must_use]
    pub fn is_free_key_result(&self) -> bool {
        self.summary.to_lowercase().contains("free") || self.deals.iter().any(Deal::is_free)
    }
}

/// Returns `true` if a display price denotes zero cost.
///
/// Accepts the literal `"Free"` (any case) and currency strings whose digits
/// are all zero, such as `"$0.00"`, `"0,00 €"`, or `"£0"`.
#[must_use]
pub fn is_zero_cost(price: &str) -> bool {
    let trimmed = price.trim();
    if trimmed.eq_ignore_ascii_case("free") {
        return true;
    }

    let mut saw_digit = false;
    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            if c != '0' {
                return false;
            }
            saw_digit = true;
        }
    }
    saw_digit
}
