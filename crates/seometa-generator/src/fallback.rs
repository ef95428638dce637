//! Deterministic, template-based metadata used whenever the AI path is
//! unavailable or untrustworthy.

use seometa_core::{
    truncate, ProductInput, SeoMetaOutput, META_DESCRIPTION_MAX_LEN, META_TITLE_MAX_LEN,
};

const PLACEHOLDER_NAME: &str = "Produto Premium";
const TITLE_SUFFIX: &str = " | Premium Selection";

/// Name tokens too generic to be useful keywords.
const KEYWORD_STOPLIST: [&str; 2] = ["gaming", "notebook"];
const MIN_KEYWORD_LEN: usize = 4;
const MAX_NAME_KEYWORDS: usize = 6;
const TOKEN_PUNCTUATION: &[char] = &[' ', ',', '.', ';', ':', '(', ')', '[', ']', '"', '\''];

/// Builds metadata for `product` without any external service.
///
/// Never fails, and the output always respects the same length and
/// non-empty rules as AI-generated metadata.
#[must_use]
pub fn generate_fallback(product: &ProductInput) -> SeoMetaOutput {
    let name = match product.name.trim() {
        "" => PLACEHOLDER_NAME,
        trimmed => trimmed,
    };

    SeoMetaOutput {
        meta_title: truncate(&format!("{name}{TITLE_SUFFIX}"), META_TITLE_MAX_LEN),
        meta_description: truncate(
            &describe(name, &product.language, &country_label(&product.country)),
            META_DESCRIPTION_MAX_LEN,
        ),
        meta_keywords: keywords(name).join(", "),
    }
}

fn country_label(country: &str) -> String {
    if country.trim().eq_ignore_ascii_case("BR") {
        "Brasil".to_owned()
    } else {
        country.to_owned()
    }
}

fn describe(name: &str, language: &str, country: &str) -> String {
    let language = language.to_lowercase();
    if language.starts_with("pt") {
        format!(
            "{name} com qualidade premium para suas necessidades. Confira a loja oficial no {country}."
        )
    } else if language.starts_with("es") {
        format!(
            "{name} con calidad premium para tus necesidades. Visita nuestra tienda oficial en {country}."
        )
    } else {
        format!("{name} with premium quality for your needs. Visit our official store in {country}.")
    }
}

/// `"premium"`, the full lowercased name, then up to six distinct name tokens.
fn keywords(name: &str) -> Vec<String> {
    let lowered = name.to_lowercase();
    let mut keywords = vec!["premium".to_owned(), lowered.clone()];

    let mut added = 0;
    for token in lowered.split_whitespace() {
        if added == MAX_NAME_KEYWORDS {
            break;
        }
        let token = token.trim_matches(TOKEN_PUNCTUATION);
        if token.chars().count() < MIN_KEYWORD_LEN || KEYWORD_STOPLIST.contains(&token) {
            continue;
        }
        if keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_owned());
        added += 1;
    }

    keywords
}
