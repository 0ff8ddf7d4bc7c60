//! Route definitions for the `/registrations` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Public routes mounted at `/registrations`.
///
/// ```text
/// POST   /   -> create (?locale)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(registration::create))
}

/// Admin routes mounted at `/admin/registrations`.
///
/// ```text
/// GET    /               -> admin_list (?limit, offset)
/// PUT    /{id}/status    -> update_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(registration::admin_list))
        .route("/{id}/status", put(registration::update_status))
}
