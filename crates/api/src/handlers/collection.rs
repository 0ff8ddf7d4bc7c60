//! Handlers for the `/collections` resource.
//!
//! Public endpoints return localized views resolved against the requested
//! locale; admin endpoints work on the raw rows plus translation upserts.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Serialize;

use lakbira_core::error::CoreError;
use lakbira_core::locale::{resolve_localized_copy, Locale};
use lakbira_core::types::{DbId, Timestamp};
use lakbira_db::models::collection::{
    Collection, CreateCollection, UpdateCollection, UpsertTranslation,
};
use lakbira_db::repositories::collection_repo::CollectionRepo;

use crate::audit::AuditInfo;
use crate::error::{AppError, AppResult};
use crate::handlers::common::LocaleQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A collection with its copy resolved for one display locale.
#[derive(Debug, Serialize)]
pub struct CollectionView {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

async fn localize(
    state: &AppState,
    collection: Collection,
    locale: Locale,
) -> AppResult<CollectionView> {
    let translations: Vec<_> = CollectionRepo::translations(&state.pool, collection.id)
        .await?
        .iter()
        .filter_map(|row| row.to_locale_row())
        .collect();

    let copy = resolve_localized_copy(locale, &collection.base_copy(), &translations);

    Ok(CollectionView {
        id: collection.id,
        slug: collection.slug,
        name: copy.name,
        description: copy.description,
        story: copy.story,
        fabric: copy.fabric,
        hero_image_url: collection.hero_image_url,
        sort_order: collection.sort_order,
        created_at: collection.created_at,
        updated_at: collection.updated_at,
    })
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Collection",
        id,
    })
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/collections
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<DataResponse<Vec<CollectionView>>>> {
    let locale = query.locale();
    let collections = CollectionRepo::list_published(&state.pool).await?;

    let mut views = Vec::with_capacity(collections.len());
    for collection in collections {
        views.push(localize(&state, collection, locale).await?);
    }

    Ok(DataResponse::json(views))
}

/// GET /api/v1/collections/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<DataResponse<CollectionView>>> {
    let collection = CollectionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Collection '{slug}' not found")))?;

    let view = localize(&state, collection, query.locale()).await?;
    Ok(DataResponse::json(view))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/collections
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let collections = CollectionRepo::list_all(&state.pool).await?;
    Ok(DataResponse::json(collections))
}

/// POST /api/v1/admin/collections
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateCollection>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Collection>>)> {
    if body.slug.trim().is_empty() || body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug and name are required".into(),
        )));
    }

    let collection = CollectionRepo::create(&state.pool, &body).await?;
    tracing::info!(collection_id = collection.id, slug = collection.slug, "Collection created");

    let info = AuditInfo {
        entity_id: Some(collection.id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(collection)))
}

/// PUT /api/v1/admin/collections/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateCollection>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Collection>>)> {
    let collection = CollectionRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| not_found(id))?;

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(collection)))
}

/// DELETE /api/v1/admin/collections/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<bool>>)> {
    let deleted = CollectionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(collection_id = id, "Collection deleted");

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(true)))
}

/// PUT /api/v1/admin/collections/{id}/translations
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

    CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let translation = CollectionRepo::upsert_translation(&state.pool, id, &body).await?;

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        changes: Some(serde_json::json!({ "locale": translation.locale })),
        ..Default::default()
    };
    Ok((
        Extension(info),
        DataResponse::json(serde_json::json!({
            "collectionId": translation.collection_id,
            "locale": translation.locale,
        })),
    ))
}
