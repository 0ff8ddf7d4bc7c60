//! Route definitions for the `/orders` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Public routes mounted at `/orders`.
///
/// ```text
/// POST   /                  -> create (guest checkout, ?locale)
/// GET    /{order_number}    -> track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(order::create))
        .route("/{order_number}", get(order::track))
}

/// Admin routes mounted at `/admin/orders`.
///
/// ```text
/// GET    /               -> admin_list (?status, limit, offset)
/// PUT    /{id}/status    -> update_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::admin_list))
        .route("/{id}/status", put(order::update_status))
}
