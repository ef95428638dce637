use thiserror::Error;

/// Failures on the AI generation path.
///
/// None of these reach callers of [`crate::SeoGenerator::generate`]; each one
/// triggers the fallback generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no generation-service credential configured")]
    Unconfigured,

    #[error("HTTP error calling generation service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("generation service returned no completion text")]
    EmptyCompletion,

    #[error("invalid JSON returned by model: {0}")]
    InvalidFormat(#[source] serde_json::Error),

    #[error("missing fields in model response")]
    IncompleteResult,
}
