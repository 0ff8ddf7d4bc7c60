//! Repository for the `products`, `product_translations`, `product_variants`,
//! and `variant_images` tables.

use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{
    CreateProduct, Product, ProductTranslation, ProductVariant, UpdateProduct, VariantImage,
};
use crate::models::collection::UpsertTranslation;

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, collection_id, slug, name, description, story, fabric, price_cents, \
    colors, default_color_hex, is_published, created_at, updated_at";

/// Column list for `product_translations` queries.
const TRANSLATION_COLUMNS: &str = "id, product_id, locale, name, description, story, fabric";

/// Column list for `product_variants` queries.
const VARIANT_COLUMNS: &str = "id, product_id, color_key, sku, created_at";

/// Provides CRUD operations for products and their colourway variants.
pub struct ProductRepo;

impl ProductRepo {
    /// List published products, optionally scoped to one collection.
    pub async fn list_published(
        pool: &PgPool,
        collection_id: Option<DbId>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let filter = if collection_id.is_some() {
            "AND collection_id = $1"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE is_published = true {filter} \
             ORDER BY id ASC"
        );
        let mut q = sqlx::query_as::<_, Product>(&query);
        if let Some(id) = collection_id {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    /// List every product (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id ASC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Find a product by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE slug = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a product.
    pub async fn create(pool: &PgPool, dto: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                 (collection_id, slug, name, description, story, fabric, price_cents, \
                  colors, default_color_hex, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(dto.collection_id)
            .bind(&dto.slug)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .bind(dto.price_cents)
            .bind(&dto.colors)
            .bind(dto.default_color_hex.as_deref())
            .bind(dto.is_published)
            .fetch_one(pool)
            .await
    }

    /// Patch a product; absent fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                 collection_id = COALESCE($2, collection_id), \
                 slug = COALESCE($3, slug), \
                 name = COALESCE($4, name), \
                 description = COALESCE($5, description), \
                 story = COALESCE($6, story), \
                 fabric = COALESCE($7, fabric), \
                 price_cents = COALESCE($8, price_cents), \
                 colors = COALESCE($9, colors), \
                 default_color_hex = COALESCE($10, default_color_hex), \
                 is_published = COALESCE($11, is_published), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(dto.collection_id)
            .bind(dto.slug.as_deref())
            .bind(dto.name.as_deref())
            .bind(dto.description.as_deref())
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .bind(dto.price_cents)
            .bind(dto.colors.as_ref())
            .bind(dto.default_color_hex.as_deref())
            .bind(dto.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the translation rows for a product.
    pub async fn translations(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM product_translations \
             WHERE product_id = $1 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ProductTranslation>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the translation row for one locale.
    pub async fn upsert_translation(
        pool: &PgPool,
        product_id: DbId,
        dto: &UpsertTranslation,
    ) -> Result<ProductTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_translations \
                 (product_id, locale, name, description, story, fabric) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (product_id, locale) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 story = EXCLUDED.story, \
                 fabric = EXCLUDED.fabric \
             RETURNING {TRANSLATION_COLUMNS}"
        );
        sqlx::query_as::<_, ProductTranslation>(&query)
            .bind(product_id)
            .bind(&dto.locale)
            .bind(dto.name.as_deref())
            .bind(dto.description.as_deref())
            .bind(dto.story.as_deref())
            .bind(dto.fabric.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Fetch the colourway variants of a product.
    pub async fn variants(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {VARIANT_COLUMNS} FROM product_variants \
             WHERE product_id = $1 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ProductVariant>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch every image attached to any variant of a product.
    pub async fn variant_images(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<VariantImage>, sqlx::Error> {
        let query = "\
            SELECT i.id, i.variant_id, i.image_url, i.sort_order \
            FROM variant_images i \
            JOIN product_variants v ON v.id = i.variant_id \
            WHERE v.product_id = $1 \
            ORDER BY i.id ASC";
        sqlx::query_as::<_, VariantImage>(query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }
}
