//! Route definitions for the admin `/broadcasts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::broadcast;
use crate::state::AppState;

/// Admin routes mounted at `/admin/broadcasts`.
///
/// ```text
/// GET    /        -> list (?limit, offset)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(broadcast::list).post(broadcast::create))
        .route("/{id}", get(broadcast::get_by_id))
}
