//! Catalog-backed command handlers.

use anyhow::Context;
use seometa_catalog::{map_product_to_input, CatalogClient};
use seometa_core::AppConfig;
use seometa_generator::SeoGenerator;

fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    if config.catalog_api_token.is_none() {
        tracing::warn!("CATALOG_API_TOKEN is not set; the catalog will likely reject requests");
    }
    CatalogClient::from_config(config).context("failed to build catalog client")
}

/// Fetch, map and generate for `sku`; with `apply`, also write the result back.
///
/// # Errors
///
/// Returns an error if the lookup fails or the catalog refuses the write.
pub(crate) async fn run_sku(
    config: &AppConfig,
    sku: &str,
    language: &str,
    apply: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let generator = SeoGenerator::from_config(config)?;

    let product = client
        .fetch_product(sku)
        .await
        .with_context(|| format!("failed to fetch product {sku}"))?;
    let input = map_product_to_input(&product, language);
    let generated = generator.generate(&input).await;
    tracing::info!(sku, source = %generated.source, "metadata generated");

    if apply {
        let result = client.apply_seo(sku, &generated.output).await;
        if !result.ok {
            anyhow::bail!(
                "catalog failed to save product {sku} (status {}): {}",
                result
                    .status_code
                    .map_or_else(|| "none".to_owned(), |s| s.to_string()),
                result.response_text
            );
        }
        tracing::info!(sku, status = ?result.status_code, "metadata applied");
    }

    println!("{}", serde_json::to_string_pretty(&generated.output)?);
    Ok(())
}

/// Print the raw catalog record for `sku`.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_fetch(config: &AppConfig, sku: &str) -> anyhow::Result<()> {
    let raw = build_client(config)?
        .fetch_product_raw(sku)
        .await
        .with_context(|| format!("failed to fetch product {sku}"))?;
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}

/// Print the current `meta_title`, `meta_description` and `meta_keyword`
/// values for `sku`, `null` where unset.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_show_seo(config: &AppConfig, sku: &str) -> anyhow::Result<()> {
    let product = build_client(config)?
        .fetch_product(sku)
        .await
        .with_context(|| format!("failed to fetch product {sku}"))?;

    let seo: serde_json::Map<String, serde_json::Value> = product
        .existing_seo()
        .into_iter()
        .map(|(code, value)| (code.to_owned(), value.cloned().unwrap_or_default()))
        .collect();
    println!("{}", serde_json::to_string_pretty(&seo)?);
    Ok(())
}
