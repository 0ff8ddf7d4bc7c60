//! Repository for the `collections` and `collection_translations` tables.

use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{
    Collection, CollectionTranslation, CreateCollection, UpdateCollection, UpsertTranslation,
};

/// Column list for `collections` queries.
const COLUMNS: &str = "\
    id, slug, name, description, story, fabric, hero_image_url, \
    sort_order, is_published, created_at, updated_at";

/// Column list for `collection_translations` queries.
const TRANSLATION_COLUMNS: &str =
    "id, collection_id, locale, name, description, story, fabric";

/// Provides CRUD operations for collections and their translations.
pub struct CollectionRepo;

impl CollectionRepo {
    /// List published collections in display order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections \
             WHERE is_published = true \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Collection>(&query).fetch_all(pool).await
    }

    /// List every collection, published or not (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Collection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM collections ORDER BY sort_order ASC, id ASC");
        sqlx::query_as::<_, Collection>(&query).fetch_all(pool).await
    }

    /// Find a collection by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE slug = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a collection by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a collection.
    pub async fn create(pool: &PgPool, dto: &CreateCollection) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections \
                 (slug, name, description, story, fabric, hero_image_url, sort_order, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(&dto.slug)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .bind(dto.hero_image_url.as_deref())
            .bind(dto.sort_order)
            .bind(dto.is_published)
            .fetch_one(pool)
            .await
    }

    /// Patch a collection; absent fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET \
                 slug = COALESCE($2, slug), \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description), \
                 story = COALESCE($5, story), \
                 fabric = COALESCE($6, fabric), \
                 hero_image_url = COALESCE($7, hero_image_url), \
                 sort_order = COALESCE($8, sort_order), \
                 is_published = COALESCE($9, is_published), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(dto.slug.as_deref())
            .bind(dto.name.as_deref())
            .bind(dto.description.as_deref())
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .bind(dto.hero_image_url.as_deref())
            .bind(dto.sort_order)
            .bind(dto.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a collection. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the translation rows for a collection.
    pub async fn translations(
        pool: &PgPool,
        collection_id: DbId,
    ) -> Result<Vec<CollectionTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM collection_translations \
             WHERE collection_id = $1 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, CollectionTranslation>(&query)
            .bind(collection_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the translation row for one locale.
    pub async fn upsert_translation(
        pool: &PgPool,
        collection_id: DbId,
        dto: &UpsertTranslation,
    ) -> Result<CollectionTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO collection_translations \
                 (collection_id, locale, name, description, story, fabric) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (collection_id, locale) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 story = EXCLUDED.story, \
                 fabric = EXCLUDED.fabric \
             RETURNING {TRANSLATION_COLUMNS}"
        );
        sqlx::query_as::<_, CollectionTranslation>(&query)
            .bind(collection_id)
            .bind(&dto.locale)
            .bind(dto.name.as_deref())
            .bind(dto.description.as_deref())
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .fetch_one(pool)
            .await
    }
}
