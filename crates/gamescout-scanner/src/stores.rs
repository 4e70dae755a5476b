//! Static storefront lookup tables.
//!
//! Both tables are ordered and the first matching key wins. A key matches
//! when it occurs in the lowercased store name; keys of two characters or
//! fewer (`"ea"`) must match a whole word so that names like `"Gleam"` do not
//! resolve to EA.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in a URL query component: alphanumerics plus
/// `- _ . ! ~ * ' ( )`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Store-name key mapped to the domain its grounding links live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreDomain {
    pub key: &'static str,
    pub domain: &'static str,
}

/// Store-name key mapped to that storefront's search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTemplate {
    pub key: &'static str,
    prefix: &'static str,
    suffix: &'static str,
}

impl SearchTemplate {
    /// Search URL for `term`, which is percent-encoded as a query component.
    #[must_use]
    pub fn url_for(&self, term: &str) -> String {
        format!("{}{}{}", self.prefix, encode_component(term), self.suffix)
    }
}

const fn domain(key: &'static str, domain: &'static str) -> StoreDomain {
    StoreDomain { key, domain }
}

const fn search(key: &'static str, prefix: &'static str, suffix: &'static str) -> SearchTemplate {
    SearchTemplate {
        key,
        prefix,
        suffix,
    }
}

pub const STORE_DOMAINS: &[StoreDomain] = &[
    domain("steam", "store.steampowered.com"),
    domain("gog", "gog.com"),
    domain("epic", "store.epicgames.com"),
    domain("humble", "humblebundle.com"),
    domain("fanatical", "fanatical.com"),
    domain("green man gaming", "greenmangaming.com"),
    domain("gamesplanet", "gamesplanet.com"),
    domain("indiegala", "indiegala.com"),
    domain("cdkeys", "cdkeys.com"),
    domain("xbox", "xbox.com"),
    domain("microsoft", "microsoft.com"),
    domain("ubisoft", "store.ubisoft.com"),
    domain("ea", "ea.com"),
    domain("origin", "ea.com"),
];

pub const SEARCH_TEMPLATES: &[SearchTemplate] = &[
    search("steam", "https://store.steampowered.com/search/?term=", ""),
    search("gog", "https://www.gog.com/en/games?query=", ""),
    search(
        "epic",
        "https://store.epicgames.com/en-US/browse?q=",
        "&sortBy=relevancy",
    ),
    search(
        "humble",
        "https://www.humblebundle.com/store/search?sort=bestselling&search=",
        "",
    ),
    search("fanatical", "https://www.fanatical.com/en/search?search=", ""),
    search(
        "green man gaming",
        "https://www.greenmangaming.com/search?query=",
        "",
    ),
    search("gamesplanet", "https://us.gamesplanet.com/search?query=", ""),
    search(
        "indiegala",
        "https://www.indiegala.com/search/store-games/",
        "",
    ),
    search(
        "cdkeys",
        "https://www.cdkeys.com/catalogsearch/result/?q=",
        "",
    ),
    search("xbox", "https://www.xbox.com/en-US/search?q=", ""),
    search(
        "microsoft",
        "https://www.microsoft.com/en-us/search/shop/games?q=",
        "",
    ),
    search("ubisoft", "https://store.ubisoft.com/us/search/?q=", ""),
    search("ea", "https://www.ea.com/search?q=", ""),
];

/// Percent-encodes `term` for use as a single URL query component.
#[must_use]
pub fn encode_component(term: &str) -> String {
    utf8_percent_encode(term, QUERY_COMPONENT).to_string()
}

/// Returns `true` if table `key` applies to an already-lowercased store name.
fn key_matches(store_lower: &str, key: &str) -> bool {
    if key.len() <= 2 {
        store_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == key)
    } else {
        store_lower.contains(key)
    }
}

/// First domain entry whose key matches `store`.
#[must_use]
pub fn domain_for_store(store: &str) -> Option<&'static StoreDomain> {
    let store_lower = store.to_lowercase();
    STORE_DOMAINS
        .iter()
        .find(|entry| key_matches(&store_lower, entry.key))
}

/// First search template whose key matches `store`.
#[must_use]
pub fn search_template_for_store(store: &str) -> Option<&'static SearchTemplate> {
    let store_lower = store.to_lowercase();
    SEARCH_TEMPLATES
        .iter()
        .find(|entry| key_matches(&store_lower, entry.key))
}
