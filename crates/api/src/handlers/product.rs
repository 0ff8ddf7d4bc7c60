//! Handlers for the `/products` resource.
//!
//! The public detail view assembles everything the product page needs in
//! one response: localized copy, the sanitized fabric colour palette with
//! the resolved default selection, and variant imagery grouped by colour.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use lakbira_core::error::CoreError;
use lakbira_core::fabric::{normalise_fabric_hex, resolve_default_fabric_color, FabricColor};
use lakbira_core::locale::{
    build_images_by_color, resolve_localized_copy, Locale, VariantImageRow, VariantRow,
};
use lakbira_core::types::{DbId, Timestamp};
use lakbira_db::models::collection::UpsertTranslation;
use lakbira_db::models::product::{CreateProduct, Product, UpdateProduct};
use lakbira_db::repositories::product_repo::ProductRepo;

use crate::audit::AuditInfo;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Query parameters for the public product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub locale: Option<String>,
    pub collection_id: Option<DbId>,
}

/// A product card for list views, copy resolved for one locale.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: DbId,
    pub collection_id: Option<DbId>,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub price_cents: i64,
    pub colors: Vec<FabricColor>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The full product page payload.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub product: ProductView,
    pub default_color: Option<FabricColor>,
    pub images_by_color: BTreeMap<String, Vec<String>>,
}

/// Parse the JSONB colour column into swatches, dropping entries whose
/// hex cannot be sanitized. Malformed JSON shapes yield an empty palette.
fn parse_palette(colors: &serde_json::Value) -> Vec<FabricColor> {
    let Ok(raw) = serde_json::from_value::<Vec<FabricColor>>(colors.clone()) else {
        return Vec::new();
    };
    raw.into_iter()
        .filter_map(|color| {
            let hex = normalise_fabric_hex(Some(&color.hex))?;
            Some(FabricColor { hex, ..color })
        })
        .collect()
}

async fn localize(state: &AppState, product: Product, locale: Locale) -> AppResult<ProductView> {
    let translations: Vec<_> = ProductRepo::translations(&state.pool, product.id)
        .await?
        .iter()
        .filter_map(|row| row.to_locale_row())
        .collect();

    let copy = resolve_localized_copy(locale, &product.base_copy(), &translations);
    let colors = parse_palette(&product.colors);

    Ok(ProductView {
        id: product.id,
        collection_id: product.collection_id,
        slug: product.slug,
        name: copy.name,
        description: copy.description,
        story: copy.story,
        fabric: copy.fabric,
        price_cents: product.price_cents,
        colors,
        created_at: product.created_at,
        updated_at: product.updated_at,
    })
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<DataResponse<Vec<ProductView>>>> {
    let locale = query
        .locale
        .as_deref()
        .and_then(Locale::parse)
        .unwrap_or(Locale::FALLBACK);

    let products = ProductRepo::list_published(&state.pool, query.collection_id).await?;

    let mut views = Vec::with_capacity(products.len());
    for product in products {
        views.push(localize(&state, product, locale).await?);
    }

    Ok(DataResponse::json(views))
}

/// GET /api/v1/products/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<DataResponse<ProductDetailView>>> {
    let locale = query
        .locale
        .as_deref()
        .and_then(Locale::parse)
        .unwrap_or(Locale::FALLBACK);

    let product = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|p| p.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Product '{slug}' not found")))?;

    let product_id = product.id;
    let stored_default = product.default_color_hex.clone();
    let view = localize(&state, product, locale).await?;

    // The stored default hex is a bare selection; the palette entry it
    // matches carries the labels.
    let selection = stored_default.map(|hex| FabricColor {
        hex,
        name: None,
        name_ar: None,
    });
    let default_color =
        resolve_default_fabric_color(&view.colors, selection.as_ref()).cloned();

    let variants: Vec<VariantRow> = ProductRepo::variants(&state.pool, product_id)
        .await?
        .into_iter()
        .map(|v| VariantRow {
            id: v.id.to_string(),
            color_key: v.color_key,
        })
        .collect();
    let images: Vec<VariantImageRow> = ProductRepo::variant_images(&state.pool, product_id)
        .await?
        .into_iter()
        .map(|i| VariantImageRow {
            variant_id: i.variant_id.to_string(),
            image_url: i.image_url,
            sort_order: i.sort_order,
        })
        .collect();

    let detail = ProductDetailView {
        product: view,
        default_color,
        images_by_color: build_images_by_color(&variants, &images),
    };

    Ok(DataResponse::json(detail))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/products
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list_all(&state.pool).await?;
    Ok(DataResponse::json(products))
}

/// POST /api/v1/admin/products
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateProduct>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Product>>)> {
    if body.slug.trim().is_empty() || body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug and name are required".into(),
        )));
    }
    if body.price_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "price_cents must not be negative".into(),
        )));
    }

    let product = ProductRepo::create(&state.pool, &body).await?;
    tracing::info!(product_id = product.id, slug = product.slug, "Product created");

    let info = AuditInfo {
        entity_id: Some(product.id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(product)))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateProduct>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Product>>)> {
    if matches!(body.price_cents, Some(p) if p < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "price_cents must not be negative".into(),
        )));
    }

    let product = ProductRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| not_found(id))?;

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(product)))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<bool>>)> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(product_id = id, "Product deleted");

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(true)))
}

/// PUT /api/v1/admin/products/{id}/translations
pub async fn upsert_translation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpsertTranslation>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<serde_json::Value>>)> {
    if Locale::parse(&body.locale).is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported locale '{}'",
            body.locale
        ))));
    }

    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let translation = ProductRepo::upsert_translation(&state.pool, id, &body).await?;

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        changes: Some(serde_json::json!({ "locale": translation.locale })),
        ..Default::default()
    };
    Ok((
        Extension(info),
        DataResponse::json(serde_json::json!({
            "productId": translation.product_id,
            "locale": translation.locale,
        })),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn palette_drops_unusable_entries() {
        let colors = json!([
            { "hex": "  ##D4af37 ", "name": "Gold" },
            { "hex": "##!!" },
            { "hex": "#f5c6d6", "nameAr": "وردي" },
        ]);

        let palette = parse_palette(&colors);

        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].hex, "#D4af37");
        assert_eq!(palette[0].name.as_deref(), Some("Gold"));
        assert_eq!(palette[1].hex, "#f5c6d6");
        assert_eq!(palette[1].name_ar.as_deref(), Some("وردي"));
    }

    #[test]
    fn malformed_palette_json_is_empty() {
        assert!(parse_palette(&json!("not-an-array")).is_empty());
        assert!(parse_palette(&json!({ "hex": "#fff" })).is_empty());
        assert!(parse_palette(&json!(null)).is_empty());
    }
}
