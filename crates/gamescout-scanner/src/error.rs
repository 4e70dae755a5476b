use thiserror::Error;

const CONFIGURATION_GUIDANCE: &str =
    "The Gemini API key is missing or invalid. Set GEMINI_API_KEY in your environment or .env file.";

const TRY_AGAIN_LATER: &str =
    "Unable to retrieve market data at this time. Please try again later.";

/// Errors returned while scanning for deals.
///
/// Unparsable model output is deliberately absent: it degrades to an empty
/// result instead of failing the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The client was handed an unusable credential; no request was sent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configured API base URL does not parse.
    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("model API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider envelope could not be decoded.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Returns `true` for errors the user fixes by editing configuration
    /// rather than by trying again.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::InvalidBaseUrl { .. } => true,
            Self::Api { status, .. } => matches!(status, 401 | 403),
            Self::Http(_) | Self::Deserialize { .. } => false,
        }
    }

    /// Message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        if self.is_configuration() {
            CONFIGURATION_GUIDANCE
        } else {
            TRY_AGAIN_LATER
        }
    }
}
