//! Prompt templates for the grounded-search model call.
//!
//! Every template asks for the same bare JSON object so the normalizer has a
//! single shape to recover. The model does not always comply; see
//! [`crate::extract`].

use std::sync::LazyLock;

use gamescout_core::SearchMode;
use regex::Regex;

/// Storefronts a standard price check must cover.
pub const PRICE_CHECK_STORES: &[&str] = &[
    "Steam",
    "GOG",
    "Epic Games Store",
    "Humble Store",
    "Green Man Gaming",
    "Fanatical",
    "Gamesplanet",
    "Indiegala",
    "CDKeys",
];

/// Sources checked when hunting for giveaways.
pub const FREE_KEY_SOURCES: &[&str] = &[
    "Steam",
    "Epic Games Store",
    "Humble Bundle",
    "Indiegala",
    "GOG",
    "Reddit (r/FreeGameFindings, r/GameDeals)",
];

static DLC_COLLECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dlcs?|expansions|add-?ons)\b").expect("valid DLC collection regex")
});

const RESPONSE_FORMAT: &str = r#"Respond with a single valid JSON object and nothing else. Do not wrap it in markdown code fences.
Use exactly this shape:
{
  "deals": [
    {
      "store": "Store Name",
      "edition": "Edition or Title",
      "currentPrice": "$XX.XX",
      "originalPrice": "$XX.XX",
      "discountPercent": 0
    }
  ],
  "summary": "One sentence summarizing the findings."
}
Use the literal string "Free" for currentPrice when the item costs nothing, and give discountPercent as a whole number from 0 to 100."#;

/// Returns `true` if `title` names a group of add-on content (e.g.
/// `"The Elder Scrolls Online DLC"`) rather than a single product.
#[must_use]
pub fn is_dlc_collection(title: &str) -> bool {
    DLC_COLLECTION.is_match(title)
}

/// Builds the prompt for one scan.
///
/// A free-key hunt with a blank title becomes the global trending search.
/// A price check expects a non-blank title; callers enforce that before
/// getting here.
#[must_use]
pub fn build_prompt(title: &str, mode: SearchMode) -> String {
    let title = title.trim();
    match mode {
        SearchMode::FreeKeys if title.is_empty() => global_free_keys_prompt(),
        SearchMode::FreeKeys => free_keys_for_title_prompt(title),
        SearchMode::PriceCheck => price_check_prompt(title),
    }
}

fn global_free_keys_prompt() -> String {
    format!(
        "Search the web for legitimate FREE STEAM KEYS, 100% OFF giveaways, and active \"Free to Keep\" promotions for popular PC games that are available right now.\n\
         Check {sources}.\n\
         Return the 3 to 6 best offers that are currently active, one deal entry per game, with the game's title as the edition.\n\
         Skip expired giveaways and anything that needs a purchase to claim.\n\
         {RESPONSE_FORMAT}",
        sources = FREE_KEY_SOURCES.join(", "),
    )
}

fn free_keys_for_title_prompt(title: &str) -> String {
    format!(
        "Search the web for legitimate FREE STEAM KEYS, 100% OFF giveaways, or current \"Free to Keep\" promotions for '{title}'.\n\
         Check {sources}.\n\
         List every active giveaway you find as its own deal entry.\n\
         If no active giveaway exists, return the cheapest current paid option instead and say so in the summary.\n\
         {RESPONSE_FORMAT}",
        sources = FREE_KEY_SOURCES.join(", "),
    )
}

fn price_check_prompt(title: &str) -> String {
    let dlc_instruction = if is_dlc_collection(title) {
        format!(
            "'{title}' refers to a collection of add-on content. Instead of one generic entry per store, list the 2 to 4 most relevant individual items (DLCs, expansions, or bundles) as separate deal entries, naming each item in the edition field.\n"
        )
    } else {
        String::new()
    };

    format!(
        "Search the web for current real-time prices of '{title}' on {stores}.\n\
         Return one deal entry per store that sells it, using the edition field for the edition name.\n\
         {dlc_instruction}\
         {RESPONSE_FORMAT}",
        stores = PRICE_CHECK_STORES.join(", "),
    )
}
