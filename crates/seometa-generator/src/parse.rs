//! Validation of the model's raw reply.

use seometa_core::{truncate, SeoMetaOutput, META_DESCRIPTION_MAX_LEN, META_TITLE_MAX_LEN};
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GenerationError;

/// Shape the model is asked to produce. Absent keys read as empty.
#[derive(Debug, Deserialize)]
struct RawSeoReply {
    #[serde(default)]
    meta_title: String,
    #[serde(default)]
    meta_description: String,
    #[serde(default)]
    meta_keywords: String,
}

/// Parses `raw` as a strict JSON object and builds validated metadata.
///
/// Title and description are trimmed and truncated to their limits; keywords
/// are trimmed only.
///
/// # Errors
///
/// - [`GenerationError::InvalidFormat`] if `raw` is not a JSON object whose
///   three keys (when present) are strings.
/// - [`GenerationError::IncompleteResult`] if any field is empty after
///   trimming.
pub fn parse_response(raw: &str) -> Result<SeoMetaOutput, GenerationError> {
    let value: Value = serde_json::from_str(raw).map_err(GenerationError::InvalidFormat)?;
    // Structs also deserialize from arrays; only an object is a valid reply.
    if !value.is_object() {
        return Err(GenerationError::InvalidFormat(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }
    let reply: RawSeoReply =
        serde_json::from_value(value).map_err(GenerationError::InvalidFormat)?;

    let output = SeoMetaOutput {
        meta_title: truncate(&reply.meta_title, META_TITLE_MAX_LEN),
        meta_description: truncate(&reply.meta_description, META_DESCRIPTION_MAX_LEN),
        meta_keywords: reply.meta_keywords.trim().to_owned(),
    };

    if !output.is_complete() {
        return Err(GenerationError::IncompleteResult);
    }

    Ok(output)
}
