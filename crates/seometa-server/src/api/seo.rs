//! SEO generation endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderName,
    response::IntoResponse,
    Extension, Json,
};
use seometa_catalog::{map_product_to_input, CatalogError};
use seometa_core::{ProductInput, SkuInput};
use seometa_generator::Generated;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Response header naming the path that produced the metadata.
const SEO_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-seo-source");

/// Bare `SeoMetaOutput` body plus the `x-seo-source` header.
fn seo_response(generated: Generated) -> impl IntoResponse {
    (
        [(SEO_SOURCE_HEADER, generated.source.as_str())],
        Json(generated.output),
    )
}

/// Unwraps a JSON body, answering a malformed one with `validation_error`
/// inside the usual error envelope.
fn json_body<T>(req_id: &str, body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(req_id, "validation_error", rejection.body_text()))
}

fn validate_sku<'a>(req_id: &str, sku: &'a str) -> Result<&'a str, ApiError> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(ApiError::new(req_id, "validation_error", "sku must not be empty"));
    }
    Ok(sku)
}

fn map_catalog_error(req_id: &str, sku: &str, error: &CatalogError) -> ApiError {
    tracing::error!(sku, error = %error, "catalog lookup failed");
    let code = match error {
        CatalogError::NotFound { .. } => "catalog_not_found",
        CatalogError::InvalidBaseUrl { .. } => "internal_error",
        _ => "catalog_error",
    };
    ApiError::new(req_id, code, error.to_string())
}

/// POST /seo-meta: generate metadata from product fields in the body.
pub(super) async fn generate_seo_meta(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let product = json_body(&req_id.0, body)?;
    Ok(seo_response(state.generator.generate(&product).await))
}

/// POST /seo-meta/sku: fetch a catalog product and generate its metadata.
pub(super) async fn generate_seo_meta_from_sku(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SkuInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let rid = &req_id.0;
    let input = json_body(rid, body)?;
    let sku = validate_sku(rid, &input.sku)?;

    let product = state
        .catalog
        .fetch_product(sku)
        .await
        .map_err(|e| map_catalog_error(rid, sku, &e))?;
    let product = map_product_to_input(&product, &input.language);

    Ok(seo_response(state.generator.generate(&product).await))
}

/// POST /seo-meta/sku/apply: generate metadata and write it to the catalog.
///
/// 200 when the catalog accepted the update, 502 when it refused it, 500 on
/// a failed lookup.
pub(super) async fn apply_seo_meta_from_sku(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SkuInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let rid = &req_id.0;
    let input = json_body(rid, body)?;
    let sku = validate_sku(rid, &input.sku)?;

    let product = state
        .catalog
        .fetch_product(sku)
        .await
        .map_err(|e| map_catalog_error(rid, sku, &e))?;
    let product = map_product_to_input(&product, &input.language);
    let generated = state.generator.generate(&product).await;

    let result = state.catalog.apply_seo(sku, &generated.output).await;
    if !result.ok {
        return Err(ApiError::new(
            rid,
            "catalog_write_failed",
            "catalog failed to save product",
        )
        .with_details(serde_json::json!({
            "catalog_status": result.status_code,
            "catalog_message": result.response_text,
        })));
    }

    tracing::info!(sku, source = %generated.source, "SEO metadata applied");
    Ok(seo_response(generated))
}

/// GET /test-product/{sku}: raw catalog record, for debugging.
pub(super) async fn test_product_lookup(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(sku): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rid = &req_id.0;
    let sku = validate_sku(rid, &sku)?;
    state
        .catalog
        .fetch_product_raw(sku)
        .await
        .map(Json)
        .map_err(|e| map_catalog_error(rid, sku, &e))
}
