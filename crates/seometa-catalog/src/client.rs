//! HTTP client for the catalog's `products` REST resource.
//!
//! Every request carries the static bearer token from configuration. Reads
//! surface failures as typed [`CatalogError`]s; writes report their outcome as
//! a [`CatalogUpdateResult`] so callers can relay the catalog's own status and
//! message.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use seometa_core::{AppConfig, SeoMetaOutput};
use serde_json::Value;

use crate::error::CatalogError;
use crate::payload::build_minimal_payload;
use crate::types::{CatalogProduct, CatalogUpdateResult};

const USER_AGENT: &str = "seometa/0.1 (seo-metadata)";

/// Client for `GET`/`PUT {base}/rest/V1/products/{sku}`.
///
/// Use [`CatalogClient::from_config`] in the binaries or
/// [`CatalogClient::new`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url` (the store origin).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        api_token: Option<&str>,
        timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let invalid = |reason: String| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) origin".to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_token: api_token.map(str::to_owned),
        })
    }

    /// Creates a client from the catalog and timeout settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.catalog_base_url,
            config.catalog_api_token.as_deref(),
            config.http_timeout_secs,
            config.http_connect_timeout_secs,
        )
    }

    /// Fetches the raw product record for `sku`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] on any other status of 400 or above.
    /// - [`CatalogError::Http`] on network failure or timeout.
    /// - [`CatalogError::Deserialize`] if the body is not JSON.
    pub async fn fetch_product_raw(&self, sku: &str) -> Result<Value, CatalogError> {
        let url = self.product_url(sku)?;
        let response = self.authorized(self.client.get(url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                sku: sku.to_owned(),
            });
        }

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("product {sku}"),
            source: e,
        })
    }

    /// Fetches the product record for `sku` as a [`CatalogProduct`].
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_product_raw`], plus
    /// [`CatalogError::Deserialize`] if the record is not a JSON object.
    /// Odd attribute entries inside an object never fail the read.
    pub async fn fetch_product(&self, sku: &str) -> Result<CatalogProduct, CatalogError> {
        let raw = self.fetch_product_raw(sku).await?;
        serde_json::from_value(raw).map_err(|e| CatalogError::Deserialize {
            context: format!("product {sku}"),
            source: e,
        })
    }

    /// Writes `seo` to the product's three SEO attributes.
    ///
    /// Re-reads the product first, then sends the minimal payload from
    /// [`build_minimal_payload`]. Never fails: a rejected read or write comes
    /// back with `ok == false` and the catalog's status and body, and a
    /// transport failure comes back with no status and the error text.
    pub async fn apply_seo(&self, sku: &str, seo: &SeoMetaOutput) -> CatalogUpdateResult {
        match self.try_apply_seo(sku, seo).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(sku, error = %e, "catalog update request failed");
                CatalogUpdateResult {
                    ok: false,
                    status_code: None,
                    response_text: e.to_string(),
                }
            }
        }
    }

    async fn try_apply_seo(
        &self,
        sku: &str,
        seo: &SeoMetaOutput,
    ) -> Result<CatalogUpdateResult, CatalogError> {
        let url = self.product_url(sku)?;

        let current = self.authorized(self.client.get(url.clone())).send().await?;
        let status = current.status();
        let body = current.text().await?;

        if status.is_client_error() || status.is_server_error() {
            tracing::error!(sku, status = status.as_u16(), body = %body, "failed to fetch product before update");
            return Ok(CatalogUpdateResult {
                ok: false,
                status_code: Some(status.as_u16()),
                response_text: format!("Failed to fetch product: {body}"),
            });
        }

        let product: CatalogProduct =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: format!("product {sku}"),
                source: e,
            })?;
        let existing = product.existing_seo();
        tracing::info!(
            sku,
            meta_title = existing[0].1.is_some(),
            meta_description = existing[1].1.is_some(),
            meta_keyword = existing[2].1.is_some(),
            "existing SEO attributes"
        );

        let payload = build_minimal_payload(seo);
        tracing::debug!(sku, payload = ?payload, "sending update payload");

        let response = self
            .authorized(self.client.put(url))
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let response_text = response.text().await?;
        let ok = !(status.is_client_error() || status.is_server_error());

        if !ok {
            tracing::error!(
                sku,
                status = status.as_u16(),
                body = %response_text,
                "catalog rejected SEO update"
            );
        }

        Ok(CatalogUpdateResult {
            ok,
            status_code: Some(status.as_u16()),
            response_text,
        })
    }

    /// Builds `{base}/rest/V1/products/{sku}`, percent-encoding the SKU as a
    /// single path segment.
    fn product_url(&self, sku: &str) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(["rest", "V1", "products", sku]);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CatalogClient {
        CatalogClient::new(base_url, Some("test-token"), 30, 10)
            .expect("client construction should not fail")
    }

    #[test]
    fn product_url_appends_rest_path() {
        let client = test_client("https://store.example.com");
        let url = client.product_url("HEADPHONES-BLUE-PRO").unwrap();
        assert_eq!(
            url.as_str(),
            "https://store.example.com/rest/V1/products/HEADPHONES-BLUE-PRO"
        );
    }

    #[test]
    fn product_url_strips_trailing_slash() {
        let client = test_client("https://store.example.com/");
        let url = client.product_url("SKU1").unwrap();
        assert_eq!(url.as_str(), "https://store.example.com/rest/V1/products/SKU1");
    }

    #[test]
    fn product_url_keeps_store_path_prefix() {
        let client = test_client("https://example.com/shop");
        let url = client.product_url("SKU1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/shop/rest/V1/products/SKU1");
    }

    #[test]
    fn product_url_encodes_sku_as_one_segment() {
        let client = test_client("https://store.example.com");
        let url = client.product_url("A/B 1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://store.example.com/rest/V1/products/A%2FB%201"
        );
    }

    #[test]
    fn new_rejects_non_http_base() {
        let result = CatalogClient::new("mailto:shop@example.com", None, 30, 10);
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
    }
}
