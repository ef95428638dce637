use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a generated meta title.
pub const META_TITLE_MAX_LEN: usize = 60;

/// Maximum length, in characters, of a generated meta description.
pub const META_DESCRIPTION_MAX_LEN: usize = 170;

/// Country assumed for every product read from the catalog.
pub const DEFAULT_COUNTRY: &str = "BR";

/// Locale used when a SKU request does not name one.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Product fields the generators work from.
///
/// Built once per request, either straight from the request body or mapped
/// from a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-like country code, e.g. `"BR"`.
    pub country: String,
    /// Locale tag, e.g. `"pt-BR"`.
    pub language: String,
}

/// Generated SEO metadata for one product.
///
/// `meta_keywords` is a single comma-separated string, matching the catalog's
/// `meta_keyword` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetaOutput {
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
}

impl SeoMetaOutput {
    /// Returns `true` when all three fields carry text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.meta_title.is_empty()
            && !self.meta_description.is_empty()
            && !self.meta_keywords.is_empty()
    }
}

/// Request body for the SKU-driven endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuInput {
    pub sku: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_input_defaults_language_to_pt_br() {
        let input: SkuInput =
            serde_json::from_str(r#"{"sku":"HEADPHONES-BLUE-PRO"}"#).expect("deserialize");
        assert_eq!(input.sku, "HEADPHONES-BLUE-PRO");
        assert_eq!(input.language, "pt-BR");
    }

    #[test]
    fn sku_input_keeps_explicit_language() {
        let input: SkuInput =
            serde_json::from_str(r#"{"sku":"X","language":"es-AR"}"#).expect("deserialize");
        assert_eq!(input.language, "es-AR");
    }

    #[test]
    fn product_input_descriptions_are_optional() {
        let input: ProductInput = serde_json::from_str(
            r#"{"name":"Blue Wireless Headphones Pro","country":"BR","language":"pt-BR"}"#,
        )
        .expect("deserialize");
        assert!(input.short_description.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn product_input_requires_country() {
        let result = serde_json::from_str::<ProductInput>(r#"{"name":"X","language":"pt-BR"}"#);
        assert!(result.is_err(), "country is required");
    }

    #[test]
    fn is_complete_rejects_any_blank_field() {
        let full = SeoMetaOutput {
            meta_title: "T".to_owned(),
            meta_description: "D".to_owned(),
            meta_keywords: "a, b".to_owned(),
        };
        assert!(full.is_complete());

        let mut blank = full.clone();
        blank.meta_description.clear();
        assert!(!blank.is_complete());
    }
}
