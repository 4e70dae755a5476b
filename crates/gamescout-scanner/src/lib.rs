//! Price and giveaway scanning for Game Scout.
//!
//! Builds a grounded-search prompt, sends it to Gemini, and turns whatever
//! text comes back into a [`gamescout_core::ScanResult`]: JSON recovery,
//! discount normalization, and a best-guess storefront link per deal.

pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod prompt;
pub mod resolve;
pub mod scan;
pub mod stores;
pub mod types;

pub use client::{GeminiClient, ModelResponse};
pub use error::ScanError;
pub use normalize::{normalize_response, normalize_response_at, FALLBACK_SUMMARY};
pub use prompt::build_prompt;
pub use scan::check_game_prices;
