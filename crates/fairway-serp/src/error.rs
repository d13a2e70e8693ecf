use thiserror::Error;

/// Errors returned by the SerpAPI client.
#[derive(Debug, Error)]
pub enum SerpError {
    /// Network or TLS failure, or a non-2xx HTTP status, from the underlying
    /// HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SerpAPI returned an `"error"` field in an otherwise-2xx response body.
    #[error("SerpAPI error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
