//! Collection entity models and DTOs.

use lakbira_core::locale::{BaseCopy, Locale, LocaleRow};
use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `collections` table. Copy fields hold the canonical
/// English text; per-locale overrides live in `collection_translations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Collection {
    /// The canonical copy carried on the row itself.
    pub fn base_copy(&self) -> BaseCopy {
        BaseCopy {
            name: self.name.clone(),
            description: self.description.clone(),
            story: self.story.clone(),
            fabric: self.fabric.clone(),
        }
    }
}

/// A row from the `collection_translations` table.
#[derive(Debug, Clone, FromRow)]
pub struct CollectionTranslation {
    pub id: DbId,
    pub collection_id: DbId,
    pub locale: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
}

impl CollectionTranslation {
    /// Convert to the locale-resolution input. Rows with an unknown locale
    /// value are skipped.
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

/// DTO for creating a collection.
#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_published: bool,
}

/// DTO for patching a collection.
#[derive(Debug, Deserialize)]
pub struct UpdateCollection {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// DTO for upserting a translation row.
#[derive(Debug, Deserialize)]
pub struct UpsertTranslation {
    pub locale: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
}
