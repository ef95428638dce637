//! Client and data shaping for the product catalog's REST API.
//!
//! Reads product records by SKU, maps them into [`seometa_core::ProductInput`],
//! and writes generated SEO attributes back.

pub mod client;
pub mod error;
pub mod mapper;
pub mod payload;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use mapper::map_product_to_input;
pub use payload::{build_full_payload, build_minimal_payload, seo_attributes};
pub use types::{CatalogProduct, CatalogUpdateResult, CustomAttribute, ProductUpdatePayload};
