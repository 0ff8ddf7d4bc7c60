//! Product entity models and DTOs.

use lakbira_core::locale::{BaseCopy, Locale, LocaleRow};
use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table. Copy fields hold the canonical English
/// text; `colors` is a JSONB array of fabric colour swatches.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub collection_id: Option<DbId>,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub price_cents: i64,
    pub colors: serde_json::Value,
    pub default_color_hex: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn base_copy(&self) -> BaseCopy {
        BaseCopy {
            name: self.name.clone(),
            description: self.description.clone(),
            story: self.story.clone(),
            fabric: self.fabric.clone(),
        }
    }
}

/// A row from the `product_translations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductTranslation {
    pub id: DbId,
    pub product_id: DbId,
    pub locale: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
}

impl ProductTranslation {
    pub fn to_locale_row(&self) -> Option<LocaleRow> {
        Some(LocaleRow {
            locale: Locale::parse(&self.locale)?,
            name: self.name.clone(),
            description: self.description.clone(),
            story: self.story.clone(),
            fabric: self.fabric.clone(),
        })
    }
}

/// A row from the `product_variants` table (one per colourway).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductVariant {
    pub id: DbId,
    pub product_id: DbId,
    pub color_key: String,
    pub sku: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `variant_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VariantImage {
    pub id: DbId,
    pub variant_id: DbId,
    pub image_url: String,
    pub sort_order: Option<i32>,
}

/// DTO for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub collection_id: Option<DbId>,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub colors: serde_json::Value,
    pub default_color_hex: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// DTO for patching a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub collection_id: Option<DbId>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub price_cents: Option<i64>,
    pub colors: Option<serde_json::Value>,
    pub default_color_hex: Option<String>,
    pub is_published: Option<bool>,
}
