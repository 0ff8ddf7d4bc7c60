//! Route definitions for the admin `/audit-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Admin routes mounted at `/admin/audit-logs`.
///
/// ```text
/// GET    /   -> list (?user_id, action, entity_type, entity_id, status,
///                      from, to, limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit::list))
}
