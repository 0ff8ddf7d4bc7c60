//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Public routes mounted at `/products`.
///
/// ```text
/// GET    /         -> list (?locale, collection_id)
/// GET    /{slug}   -> get_by_slug (?locale)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list))
        .route("/{slug}", get(product::get_by_slug))
}

/// Admin routes mounted at `/admin/products`.
///
/// ```text
/// GET    /                    -> admin_list
/// POST   /                    -> create
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// PUT    /{id}/translations   -> upsert_translation
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::admin_list).post(product::create))
        .route("/{id}", put(product::update).delete(product::delete))
        .route("/{id}/translations", put(product::upsert_translation))
}
