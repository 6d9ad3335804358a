use thiserror::Error;

/// Errors returned by the juso.go.kr address-search client.
#[derive(Debug, Error)]
pub enum JusoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API envelope reported a non-normal `errorMessage`.
    #[error("juso API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
