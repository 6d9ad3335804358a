use thiserror::Error;

/// Errors returned by the open-data dataset clients.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The dataset service reported an application-level error code.
    #[error("{service} API error {code}: {message}")]
    Api {
        service: String,
        code: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller passed an address record whose derivation failed.
    /// Check `Address::is_valid` before querying datasets.
    #[error("address record is not valid")]
    InvalidAddress,

    /// The service answered normally but returned no rows.
    #[error("{service} returned no data")]
    NoData { service: String },
}
