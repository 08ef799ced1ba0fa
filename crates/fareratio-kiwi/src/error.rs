use thiserror::Error;

/// Errors returned by the Tequila API client.
#[derive(Debug, Error)]
pub enum KiwiError {
    /// Network or TLS failure, or a non-2xx status from a lookup.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The fare search answered with something other than `200 OK`.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The API key contains characters that cannot go in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
}
