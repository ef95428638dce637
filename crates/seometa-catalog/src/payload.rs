//! Catalog update payloads carrying generated SEO attributes.

use seometa_core::SeoMetaOutput;
use serde_json::{Map, Value};

use crate::types::{
    CustomAttribute, ProductUpdateBody, ProductUpdatePayload, META_DESCRIPTION_CODE,
    META_KEYWORD_CODE, META_TITLE_CODE,
};

/// Core product fields copied into the full-preserving payload.
const PRESERVED_FIELDS: [&str; 14] = [
    "id",
    "sku",
    "name",
    "attribute_set_id",
    "price",
    "status",
    "visibility",
    "type_id",
    "weight",
    "extension_attributes",
    "product_links",
    "options",
    "media_gallery_entries",
    "tier_prices",
];

/// Custom attributes dropped from the full-preserving payload. The catalog
/// rejects them on write: `tier_price_for_store` comes back as an array but
/// must be sent as a number, and `category_ids` belongs in
/// `extension_attributes`.
const EXCLUDED_ATTRIBUTES: [&str; 2] = ["tier_price_for_store", "category_ids"];

/// The three SEO attributes carrying `seo`'s values.
#[must_use]
pub fn seo_attributes(seo: &SeoMetaOutput) -> Vec<CustomAttribute> {
    vec![
        CustomAttribute::text(META_TITLE_CODE, &seo.meta_title),
        CustomAttribute::text(META_DESCRIPTION_CODE, &seo.meta_description),
        CustomAttribute::text(META_KEYWORD_CODE, &seo.meta_keywords),
    ]
}

/// Payload containing only the SEO custom attributes.
///
/// Used for every write: sending untouched fields back risks validation
/// errors on attributes this service never meant to change.
#[must_use]
pub fn build_minimal_payload(seo: &SeoMetaOutput) -> ProductUpdatePayload {
    ProductUpdatePayload {
        product: ProductUpdateBody {
            fields: Map::new(),
            custom_attributes: seo_attributes(seo).iter().map(CustomAttribute::to_json).collect(),
        },
    }
}

/// Payload that re-sends the original record's core fields and custom
/// attributes with the SEO values replaced.
///
/// Every entry that is neither an SEO attribute nor excluded is copied
/// verbatim, whatever its shape. SEO attributes keep their original
/// position; missing ones are appended. Duplicate SEO entries in the original
/// collapse into the first, so each SEO code appears exactly once.
#[must_use]
pub fn build_full_payload(raw_product: &Value, seo: &SeoMetaOutput) -> ProductUpdatePayload {
    let mut fields = Map::new();
    for key in PRESERVED_FIELDS {
        if let Some(value) = raw_product.get(key) {
            fields.insert(key.to_owned(), value.clone());
        }
    }

    let replacements = seo_attributes(seo);
    let mut written = [false; 3];
    let mut custom_attributes = Vec::new();

    let originals = raw_product
        .get("custom_attributes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for raw in originals {
        let code = raw.get("attribute_code").and_then(Value::as_str);
        if code.is_some_and(|c| EXCLUDED_ATTRIBUTES.contains(&c)) {
            continue;
        }
        match code.and_then(|c| replacements.iter().position(|r| r.attribute_code == c)) {
            Some(idx) if written[idx] => {}
            Some(idx) => {
                custom_attributes.push(replacements[idx].to_json());
                written[idx] = true;
            }
            None => custom_attributes.push(raw.clone()),
        }
    }

    for (idx, replacement) in replacements.iter().enumerate() {
        if !written[idx] {
            custom_attributes.push(replacement.to_json());
        }
    }

    ProductUpdatePayload {
        product: ProductUpdateBody {
            fields,
            custom_attributes,
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::SEO_ATTRIBUTE_CODES;

    fn seo() -> SeoMetaOutput {
        SeoMetaOutput {
            meta_title: "New Title".to_owned(),
            meta_description: "New description".to_owned(),
            meta_keywords: "premium, headphones".to_owned(),
        }
    }

    fn code_of(entry: &Value) -> Option<&str> {
        entry.get("attribute_code").and_then(Value::as_str)
    }

    fn count_code(payload: &ProductUpdatePayload, code: &str) -> usize {
        payload
            .product
            .custom_attributes
            .iter()
            .filter(|a| code_of(a) == Some(code))
            .count()
    }

    #[test]
    fn minimal_payload_serializes_only_custom_attributes() {
        let json = serde_json::to_value(build_minimal_payload(&seo())).expect("serialize");
        assert_eq!(
            json,
            json!({
                "product": {
                    "custom_attributes": [
                        { "attribute_code": "meta_title", "value": "New Title" },
                        { "attribute_code": "meta_description", "value": "New description" },
                        { "attribute_code": "meta_keyword", "value": "premium, headphones" }
                    ]
                }
            })
        );
    }

    #[test]
    fn full_payload_replaces_existing_seo_in_place() {
        let raw = json!({
            "id": 7,
            "sku": "SKU-1",
            "name": "Headphones",
            "created_at": "2024-01-01",
            "custom_attributes": [
                { "attribute_code": "url_key", "value": "headphones" },
                { "attribute_code": "meta_title", "value": "Old Title" },
                { "attribute_code": "color", "value": "49" }
            ]
        });

        let payload = build_full_payload(&raw, &seo());
        let attrs = &payload.product.custom_attributes;

        assert_eq!(code_of(&attrs[0]), Some("url_key"));
        assert_eq!(attrs[1], json!({ "attribute_code": "meta_title", "value": "New Title" }));
        assert_eq!(attrs[2], json!({ "attribute_code": "color", "value": "49" }));
        assert_eq!(attrs.len(), 5);
        assert_eq!(payload.product.fields.get("id"), Some(&json!(7)));
        assert!(
            !payload.product.fields.contains_key("created_at"),
            "only whitelisted core fields are copied"
        );
    }

    #[test]
    fn full_payload_drops_excluded_attributes() {
        let raw = json!({
            "custom_attributes": [
                { "attribute_code": "tier_price_for_store", "value": [] },
                { "attribute_code": "category_ids", "value": ["3", "9"] },
                { "attribute_code": "url_key", "value": "x" }
            ]
        });

        let payload = build_full_payload(&raw, &seo());
        let codes: Vec<&str> = payload
            .product
            .custom_attributes
            .iter()
            .filter_map(code_of)
            .collect();
        assert_eq!(
            codes,
            ["url_key", "meta_title", "meta_description", "meta_keyword"]
        );
    }

    #[test]
    fn every_shape_emits_each_seo_code_exactly_once() {
        let records = [
            json!({}),
            json!({ "custom_attributes": null }),
            json!({ "custom_attributes": [
                { "attribute_code": "meta_keyword", "value": "old" },
                { "attribute_code": "meta_keyword", "value": "older" },
                { "attribute_code": "meta_title", "value": "old" }
            ]}),
        ];

        let minimal = build_minimal_payload(&seo());
        for code in SEO_ATTRIBUTE_CODES {
            assert_eq!(count_code(&minimal, code), 1, "minimal payload, code {code}");
        }

        for raw in &records {
            let payload = build_full_payload(raw, &seo());
            for code in SEO_ATTRIBUTE_CODES {
                assert_eq!(count_code(&payload, code), 1, "record {raw}, code {code}");
            }
        }
    }

    #[test]
    fn full_payload_writes_new_keyword_value() {
        let raw = json!({ "custom_attributes": [
            { "attribute_code": "meta_keyword", "value": "old" }
        ]});
        let payload = build_full_payload(&raw, &seo());
        let keyword = payload
            .product
            .custom_attributes
            .iter()
            .find(|a| code_of(a) == Some("meta_keyword"))
            .expect("keyword present");
        assert_eq!(keyword["value"], json!("premium, headphones"));
    }

    #[test]
    fn full_payload_keeps_unrecognised_entries_verbatim() {
        let odd = [
            json!({ "attribute_code": null, "value": "x" }),
            json!({ "attribute_code": "color", "value": "49", "extension": { "k": 1 } }),
            json!("stray"),
        ];
        let raw = json!({ "custom_attributes": odd.clone() });

        let payload = build_full_payload(&raw, &seo());
        let attrs = &payload.product.custom_attributes;

        assert_eq!(&attrs[..3], &odd[..]);
        for code in SEO_ATTRIBUTE_CODES {
            assert_eq!(count_code(&payload, code), 1, "code {code}");
        }
    }
}
