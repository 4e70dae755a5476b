//! Best-guess storefront links for reported deals.
//!
//! Resolution runs in two stages and the first hit wins:
//!
//! 1. A grounding reference on the store's known domain.
//! 2. A search URL: the store's own search page when it has a template,
//!    otherwise a generic web search for `"{term} {store} store page"`.
//!
//! Grounding links that go through Google's `/url` redirector are treated as
//! unresolved and fall through to stage 2.

use std::sync::LazyLock;

use gamescout_core::GroundingReference;
use regex::Regex;

use crate::stores::{domain_for_store, encode_component, search_template_for_store};

/// Marker of a search-engine redirect link.
pub const SEARCH_REDIRECTOR: &str = "google.com/url";

const GENERIC_SEARCH_PREFIX: &str = "https://www.google.com/search?q=";

static NOISE_SUFFIXES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\s*-\s*Giveaway\b").expect("valid giveaway regex"),
        Regex::new(r"(?i)\s*-\s*Free\b").expect("valid free regex"),
        Regex::new(r"(?i)\s*\bEdition\b").expect("valid edition regex"),
    ]
});

/// Where a resolved link came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUrl {
    /// A grounding reference on the store's domain.
    Grounded(String),
    /// The store's own search page.
    StoreSearch(String),
    /// A generic web search.
    WebSearch(String),
}

impl ResolvedUrl {
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::Grounded(url) | Self::StoreSearch(url) | Self::WebSearch(url) => url,
        }
    }
}

/// Strips `"- Giveaway"`, `"- Free"`, and `"Edition"` noise from a search term.
#[must_use]
pub fn clean_search_term(term: &str) -> String {
    NOISE_SUFFIXES
        .iter()
        .fold(term.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
        .trim()
        .to_string()
}

/// Resolves the link for one deal.
///
/// `query_title` is the title the user searched for; when it is blank (the
/// global free-key hunt) the deal's `edition` is searched for instead.
/// Returns `None` only when a store template matched but there was no term
/// left to search for.
#[must_use]
pub fn resolve_deal_url(
    store: &str,
    edition: &str,
    query_title: &str,
    references: &[GroundingReference],
) -> Option<ResolvedUrl> {
    grounded_store_url(store, references)
        .map(ResolvedUrl::Grounded)
        .or_else(|| fallback_search_url(store, edition, query_title))
}

/// Stage 1: the first grounding reference on the store's domain.
fn grounded_store_url(store: &str, references: &[GroundingReference]) -> Option<String> {
    let entry = domain_for_store(store)?;
    let reference = references
        .iter()
        .find(|r| r.uri.to_lowercase().contains(entry.domain))?;

    if reference.uri.to_lowercase().contains(SEARCH_REDIRECTOR) {
        tracing::debug!(store, uri = %reference.uri, "ignoring redirector grounding link");
        return None;
    }

    Some(reference.uri.clone())
}

/// Stage 2: a store search page, or a generic web search.
fn fallback_search_url(store: &str, edition: &str, query_title: &str) -> Option<ResolvedUrl> {
    let title = query_title.trim();
    let subject = if title.is_empty() {
        edition.trim()
    } else {
        title
    };

    if let Some(template) = search_template_for_store(store) {
        let term = clean_search_term(subject);
        if term.is_empty() {
            tracing::debug!(store, "no search term left for store template");
            return None;
        }
        return Some(ResolvedUrl::StoreSearch(template.url_for(&term)));
    }

    let query = [subject, store.trim(), "store page"]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(ResolvedUrl::WebSearch(format!(
        "{GENERIC_SEARCH_PREFIX}{}",
        encode_component(&query)
    )))
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
