//! Route definitions for the `/collections` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::collection;
use crate::state::AppState;

/// Public routes mounted at `/collections`.
///
/// ```text
/// GET    /         -> list (?locale)
/// GET    /{slug}   -> get_by_slug (?locale)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collection::list))
        .route("/{slug}", get(collection::get_by_slug))
}

/// Admin routes mounted at `/admin/collections`.
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
        .route("/", get(collection::admin_list).post(collection::create))
        .route("/{id}", put(collection::update).delete(collection::delete))
        .route("/{id}/translations", put(collection::upsert_translation))
}
