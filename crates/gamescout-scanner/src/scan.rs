use gamescout_core::{ScanResult, SearchMode};

use crate::client::GeminiClient;
use crate::error::ScanError;
use crate::normalize::normalize_response;
use crate::prompt::build_prompt;

/// Runs one market scan: builds the prompt, makes a single grounded model
/// call, and normalizes whatever comes back.
///
/// A blank `title` in [`SearchMode::FreeKeys`] runs the global free-key hunt.
///
/// # Errors
///
/// Returns [`ScanError`] if the model call fails. Unreadable model text is
/// not an error; it yields an empty [`ScanResult`].
pub async fn check_game_prices(
    client: &GeminiClient,
    title: &str,
    mode: SearchMode,
) -> Result<ScanResult, ScanError> {
    let title = title.trim();
    let prompt = build_prompt(title, mode);

    let response = client.generate(&prompt).await.inspect_err(|e| {
        tracing::error!(title, ?mode, error = %e, "market scan failed");
    })?;

    let result = normalize_response(&response.text, &response.grounding_references, title);
    tracing::info!(
        title,
        ?mode,
        model = client.model(),
        deals = result.deals.len(),
        references = response.grounding_references.len(),
        mega_sale = result.has_mega_sale(),
        "market scan complete"
    );

    Ok(result)
}
