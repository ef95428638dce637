//! Maps catalog product records into generator input.

use seometa_core::{ProductInput, DEFAULT_COUNTRY};
use serde_json::Value;

use crate::types::CatalogProduct;

/// Builds a [`ProductInput`] from a catalog record. Never fails.
///
/// Reads `name` (empty when absent) and the `short_description` and
/// `description` custom attributes, resolved through
/// [`CatalogProduct::attribute`] so a repeated code yields its last value.
///
/// `country` is always [`DEFAULT_COUNTRY`]: the catalog record carries no
/// store locale, so every mapped product is treated as a Brazilian listing.
#[must_use]
pub fn map_product_to_input(product: &CatalogProduct, language: &str) -> ProductInput {
    ProductInput {
        name: product.name.clone().unwrap_or_default(),
        short_description: product.attribute("short_description").and_then(value_as_text),
        description: product.attribute("description").and_then(value_as_text),
        country: DEFAULT_COUNTRY.to_owned(),
        language: language.to_owned(),
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
