use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network, TLS, or timeout failure talking to the catalog.
    #[error("HTTP error calling catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("product with SKU '{sku}' not found in catalog")]
    NotFound { sku: String },

    #[error("catalog returned error {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
