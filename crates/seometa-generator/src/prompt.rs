//! Instruction text sent to the generation model.

use seometa_core::{ProductInput, META_DESCRIPTION_MAX_LEN, META_TITLE_MAX_LEN};

/// System message framing every generation request.
pub const SYSTEM_PROMPT: &str =
    "You are an SEO assistant specialized in e-commerce product catalog optimization.";

const EMPTY_FIELD: &str = "(empty)";

/// Renders the user message for `product`.
///
/// Pure: the same product always yields the same text.
#[must_use]
pub fn build_prompt(product: &ProductInput) -> String {
    let short_description = product
        .short_description
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_FIELD);
    let description = product
        .description
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_FIELD);

    format!(
        r#"Generate SEO metadata for the following product.

Product data:
- Name: {name}
- Short Description: {short_description}
- Description: {description}
- Country: {country}
- Language: {language}

Rules:
1. Use the language provided in "Language".
2. Meta Title (max {META_TITLE_MAX_LEN} chars): must include a short summary of the product.
3. Meta Description (max {META_DESCRIPTION_MAX_LEN} chars): include
   - The main benefit
   - 1–2 important features
   - A light call to action (e.g., Visit the store).
4. Meta Keywords:
   - Between 5–10 terms separated by commas.
   - No prices or promotional terms.
5. Respond ONLY with pure JSON containing exactly these keys:

{{
  "meta_title": "...",
  "meta_description": "...",
  "meta_keywords": "..., ..."
}}"#,
        name = product.name,
        country = product.country,
        language = product.language,
    )
}
