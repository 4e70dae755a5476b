//! Plain-text rendering of scan results for the terminal.

use gamescout_core::{Deal, ScanResult, TRENDING_TITLES};

pub(crate) const NO_RESULTS_MESSAGE: &str =
    "No pricing data found. Try checking again or check the spelling.";

/// Render a full scan result under a `Results for:` header.
///
/// The alert banner only appears when some deal is discounted 90% or more;
/// its wording depends on whether the result looks like a giveaway.
pub(crate) fn render_result(display_title: &str, result: &ScanResult) -> String {
    let mut lines = vec![format!("Results for: {display_title}"), String::new()];

    if result.has_mega_sale() {
        let (headline, detail) = if result.is_free_key_result() {
            ("FREE KEY FOUND!", "A giveaway or 100% discount is active.")
        } else {
            ("90%+ SALE DETECTED!", "Incredible savings have been detected.")
        };
        lines.push(format!("*** {headline} ***"));
        lines.push(detail.to_string());
        lines.push(String::new());
    }

    if !result.summary.is_empty() {
        lines.push(format!("\"{}\"", result.summary));
        lines.push(String::new());
    }

    if result.deals.is_empty() {
        lines.push(NO_RESULTS_MESSAGE.to_string());
    } else {
        for deal in &result.deals {
            lines.extend(render_deal(deal));
            lines.push(String::new());
        }
    }

    let mut rendered = lines.join("\n");
    rendered.truncate(rendered.trim_end().len());
    rendered.push('\n');
    rendered
}

fn render_deal(deal: &Deal) -> Vec<String> {
    let heading = if deal.is_sale() {
        format!("{}  -{}%", deal.store, deal.discount_percent)
    } else {
        deal.store.clone()
    };

    let price = if deal.is_sale() && !deal.original_price.is_empty() {
        format!("{}  (was {})", deal.current_price, deal.original_price)
    } else {
        deal.current_price.clone()
    };

    let mut lines = vec![heading];
    if !deal.edition.is_empty() {
        lines.push(format!("  {}", deal.edition));
    }
    lines.push(format!("  {price}"));
    lines.push(format!("  {}", deal.url.as_deref().unwrap_or("(no link)")));
    lines.push(format!("  checked {}", deal.last_checked));
    lines
}

/// One quick-search title per line.
pub(crate) fn render_trending() -> String {
    let mut rendered = TRENDING_TITLES.join("\n");
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(store: &str, current: &str, discount: u8, url: Option<&str>) -> Deal {
        Deal {
            id: "deal-0-1".to_string(),
            store: store.to_string(),
            edition: "Standard Edition".to_string(),
            current_price: current.to_string(),
            original_price: "$59.99".to_string(),
            discount_percent: discount,
            url: url.map(str::to_string),
            last_checked: "3:04:05 PM".to_string(),
        }
    }

    #[test]
    fn empty_result_shows_no_data_message() {
        let result = ScanResult {
            deals: vec![],
            summary: "Nothing found.".to_string(),
        };
        let out = render_result("Elden Ring", &result);
        assert!(out.starts_with("Results for: Elden Ring\n"));
        assert!(out.contains("\"Nothing found.\""));
        assert!(out.contains(NO_RESULTS_MESSAGE));
        assert!(!out.contains("DETECTED"));
    }

    #[test]
    fn sale_deal_shows_discount_and_original_price() {
        let result = ScanResult {
            deals: vec![deal(
                "Steam",
                "$35.99",
                40,
                Some("https://store.steampowered.com/app/1"),
            )],
            summary: "Steam is cheapest.".to_string(),
        };
        let out = render_result("Elden Ring", &result);
        assert!(out.contains("Steam  -40%"));
        assert!(out.contains("$35.99  (was $59.99)"));
        assert!(out.contains("https://store.steampowered.com/app/1"));
        assert!(out.contains("checked 3:04:05 PM"));
        assert!(!out.contains("***"));
    }

    #[test]
    fn full_price_deal_without_link() {
        let result = ScanResult {
            deals: vec![deal("GOG", "$59.99", 0, None)],
            summary: String::new(),
        };
        let out = render_result("Elden Ring", &result);
        assert!(out.contains("\nGOG\n"));
        assert!(!out.contains("(was"));
        assert!(out.contains("(no link)"));
    }

    #[test]
    fn mega_sale_banner_wording() {
        let sale = ScanResult {
            deals: vec![deal("Fanatical", "$5.99", 90, None)],
            summary: "Huge discount on Fanatical.".to_string(),
        };
        assert!(render_result("Elden Ring", &sale).contains("*** 90%+ SALE DETECTED! ***"));

        let giveaway = ScanResult {
            deals: vec![deal("Epic Games Store", "Free", 100, None)],
            summary: "One giveaway is live.".to_string(),
        };
        assert!(render_result("All Trending Free Games", &giveaway)
            .contains("*** FREE KEY FOUND! ***"));
    }

    #[test]
    fn trending_lists_every_title() {
        let out = render_trending();
        assert_eq!(out.lines().count(), TRENDING_TITLES.len());
        assert!(out.contains("Baldur's Gate 3"));
    }
}
