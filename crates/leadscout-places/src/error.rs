use thiserror::Error;

/// Errors returned by [`crate::GooglePlacesClient`].
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key was configured; raised when the client is constructed.
    #[error("GOOGLE_MAPS_API_KEY is required")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status, with the response body verbatim.
    #[error("Places API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
