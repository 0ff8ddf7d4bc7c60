pub mod audit;
pub mod auth;
pub mod broadcast;
pub mod collection;
pub mod health;
pub mod notification;
pub mod order;
pub mod product;
pub mod registration;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::audit::audit_middleware;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           account sign-up (public)
/// /auth/login                              login (public)
/// /auth/me                                 profile (GET, PUT; requires auth)
///
/// /collections                             list published (?locale)
/// /collections/{slug}                      localized detail (?locale)
/// /products                                list published (?locale, collection_id)
/// /products/{slug}                         localized detail with palette + imagery
///
/// /orders                                  guest checkout (POST)
/// /orders/{order_number}                   public tracking (GET)
/// /registrations                           launch-interest sign-up (POST)
///
/// /notifications                           inbox (?channel, unread_only, include_archived, limit, offset)
/// /notifications/read-all                  mark all read (POST)
/// /notifications/unread-count              unread count (GET)
/// /notifications/{id}/read                 mark read (POST)
/// /notifications/{id}/archive              soft-archive (POST)
/// /notifications/preferences               get, update preferences (GET, PUT)
///
/// /admin/collections                       list, create (admin only)
/// /admin/collections/{id}                  update, delete
/// /admin/collections/{id}/translations     upsert translation (PUT)
/// /admin/products                          list, create (admin only)
/// /admin/products/{id}                     update, delete
/// /admin/products/{id}/translations        upsert translation (PUT)
/// /admin/orders                            list (?status, limit, offset)
/// /admin/orders/{id}/status                update status (PUT)
/// /admin/registrations                     list (?limit, offset)
/// /admin/registrations/{id}/status         update status (PUT)
/// /admin/broadcasts                        list, create (admin only)
/// /admin/broadcasts/{id}                   get (admin only)
/// /admin/audit-logs                        filterable trail (admin only)
/// ```
///
/// Every mutating admin request and the login endpoint pass through the
/// audit middleware on the way out.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Authentication.
        .nest("/auth", auth::router())
        // Public storefront catalogue.
        .nest("/collections", collection::router())
        .nest("/products", product::router())
        // Guest checkout and tracking.
        .nest("/orders", order::router())
        // Launch-interest registrations.
        .nest("/registrations", registration::router())
        // Authenticated inbox and preferences.
        .nest("/notifications", notification::router())
        // Admin surface.
        .nest("/admin/collections", collection::admin_router())
        .nest("/admin/products", product::admin_router())
        .nest("/admin/orders", order::admin_router())
        .nest("/admin/registrations", registration::admin_router())
        .nest("/admin/broadcasts", broadcast::router())
        .nest("/admin/audit-logs", audit::router())
        // Audit trail for mutating admin requests and logins.
        .layer(from_fn_with_state(state, audit_middleware))
}
