use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// Attribute code for the SEO title.
pub const META_TITLE_CODE: &str = "meta_title";
/// Attribute code for the SEO description.
pub const META_DESCRIPTION_CODE: &str = "meta_description";
/// Attribute code for the SEO keywords. Singular in the catalog schema.
pub const META_KEYWORD_CODE: &str = "meta_keyword";

/// The three attribute codes this service writes.
pub const SEO_ATTRIBUTE_CODES: [&str; 3] =
    [META_TITLE_CODE, META_DESCRIPTION_CODE, META_KEYWORD_CODE];

/// One `{attribute_code, value}` entry from a product's `custom_attributes`.
///
/// `value` stays untyped: the catalog returns strings for most attributes but
/// arrays or numbers for some (e.g. `category_ids`). A `null` or non-string
/// code reads as empty and matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    #[serde(default, deserialize_with = "code_or_empty")]
    pub attribute_code: String,
    #[serde(default)]
    pub value: Value,
}

impl CustomAttribute {
    #[must_use]
    pub fn text(code: &str, value: &str) -> Self {
        Self {
            attribute_code: code.to_owned(),
            value: Value::String(value.to_owned()),
        }
    }

    /// The `{"attribute_code", "value"}` object sent on writes.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({ "attribute_code": self.attribute_code, "value": self.value })
    }
}

/// Typed view over a catalog product record.
///
/// Only `name` and `custom_attributes` are read; every other field is kept in
/// `extra` untouched. Reading is lenient so that one odd field never costs
/// the whole record: a non-string `name` is stringified, and entries of
/// `custom_attributes` that are not objects are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(default, deserialize_with = "text_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "object_entries")]
    pub custom_attributes: Option<Vec<CustomAttribute>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogProduct {
    /// Returns the custom attributes, treating an absent or `null` list as empty.
    #[must_use]
    pub fn attributes(&self) -> &[CustomAttribute] {
        self.custom_attributes.as_deref().unwrap_or_default()
    }

    /// Returns the value of the attribute with the given code. When the code
    /// repeats, the last occurrence wins.
    #[must_use]
    pub fn attribute(&self, code: &str) -> Option<&Value> {
        self.attributes()
            .iter()
            .rev()
            .find(|a| a.attribute_code == code)
            .map(|a| &a.value)
    }

    /// Returns the current value of each SEO attribute, in
    /// [`SEO_ATTRIBUTE_CODES`] order. Missing attributes map to `None`.
    #[must_use]
    pub fn existing_seo(&self) -> Vec<(&'static str, Option<&Value>)> {
        SEO_ATTRIBUTE_CODES
            .iter()
            .map(|code| (*code, self.attribute(code)))
            .collect()
    }
}

fn code_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => code,
        _ => String::new(),
    })
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn object_entries<'de, D>(deserializer: D) -> Result<Option<Vec<CustomAttribute>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
    ))
}

/// Request body for `PUT /products/{sku}`: `{"product": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdatePayload {
    pub product: ProductUpdateBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdateBody {
    /// Core product fields copied from the original record. Empty for the
    /// minimal payload.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Attribute entries as sent. Entries carried over from the original
    /// record are kept verbatim.
    pub custom_attributes: Vec<Value>,
}

/// Outcome of a catalog write. Returned to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogUpdateResult {
    pub ok: bool,
    /// `None` when the request never got a response.
    pub status_code: Option<u16>,
    pub response_text: String,
}
