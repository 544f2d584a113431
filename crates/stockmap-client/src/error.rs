use thiserror::Error;

/// Errors returned by the inventory client.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid inventory endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
