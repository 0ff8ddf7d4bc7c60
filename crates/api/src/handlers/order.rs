//! Handlers for the `/orders` resource.
//!
//! Checkout is a guest flow: anyone can place an order, and the row is
//! linked to an account only when the customer email matches one. Status
//! transitions are admin-only and notify the linked customer.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use lakbira_core::audit::compute_changes;
use lakbira_core::error::CoreError;
use lakbira_core::types::DbId;
use lakbira_db::models::order::{order_statuses, CreateOrder, Order, UpdateOrderStatus};
use lakbira_db::repositories::order_repo::OrderRepo;
use lakbira_db::repositories::user_repo::UserRepo;
use lakbira_notify::templates;

use crate::audit::AuditInfo;
use crate::error::{AppError, AppResult};
use crate::handlers::common::{LocaleQuery, PageQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Generate a public order number: `LK-` plus eight hex characters.
fn generate_order_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("LK-{suffix}")
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Place an order. The confirmation email and the in-app notification for
/// linked accounts are best-effort; a delivery failure never fails the
/// checkout.
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
    Json(body): Json<CreateOrder>,
) -> AppResult<Json<DataResponse<Order>>> {
    if body.customer_name.trim().is_empty()
        || body.customer_email.trim().is_empty()
        || body.shipping_address.trim().is_empty()
    {
        return Err(AppError::Core(CoreError::Validation(
            "customer_name, customer_email, and shipping_address are required".into(),
        )));
    }
    if !body.items.is_array() || body.items.as_array().is_some_and(|items| items.is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "items must be a non-empty array".into(),
        )));
    }
    if body.total_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "total_cents must not be negative".into(),
        )));
    }

    let linked_user = UserRepo::find_by_email(&state.pool, &body.customer_email).await?;
    let user_id = linked_user.as_ref().map(|u| u.id);

    let order_number = generate_order_number();
    let order = OrderRepo::create(&state.pool, &order_number, user_id, &body).await?;

    tracing::info!(
        order_id = order.id,
        order_number = order.order_number,
        linked = user_id.is_some(),
        "Order placed"
    );

    let copy = templates::order_confirmation(
        query.locale(),
        &order.customer_name,
        &order.order_number,
    );
    state
        .dispatcher
        .send_guest_email(&order.customer_email, &copy)
        .await;

    if let Some(user_id) = user_id {
        if let Err(error) = state
            .dispatcher
            .send_order_status(user_id, order.id, &order.order_number, &order.status)
            .await
        {
            tracing::warn!(order_id = order.id, %error, "Order notification failed");
        }
    }

    Ok(DataResponse::json(order))
}

/// GET /api/v1/orders/{order_number}
///
/// Public order tracking by order number.
pub async fn track(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = OrderRepo::find_by_number(&state.pool, &order_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order '{order_number}' not found")))?;

    Ok(DataResponse::json(order))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// Query parameters for the admin order list.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// GET /api/v1/admin/orders
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    if let Some(status) = query.status.as_deref() {
        if !order_statuses::ALL.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown order status '{status}'"
            ))));
        }
    }

    let orders = OrderRepo::list(
        &state.pool,
        query.status.as_deref(),
        query.page.limit(),
        query.page.offset(),
    )
    .await?;

    Ok(DataResponse::json(orders))
}

/// PUT /api/v1/admin/orders/{id}/status
///
/// Transition an order's status and notify the linked customer. The audit
/// entry records the status diff.
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateOrderStatus>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Order>>)> {
    if !order_statuses::ALL.contains(&body.status.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown order status '{}'",
            body.status
        ))));
    }

    let existing = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let order = OrderRepo::update_status(&state.pool, id, &body.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    tracing::info!(
        order_id = order.id,
        from = existing.status,
        to = order.status,
        "Order status updated"
    );

    if let Some(user_id) = order.user_id {
        if let Err(error) = state
            .dispatcher
            .send_order_status(user_id, order.id, &order.order_number, &order.status)
            .await
        {
            tracing::warn!(order_id = order.id, %error, "Status notification failed");
        }
    }

    let changes = compute_changes(
        &status_fields(&existing.status),
        &status_fields(&order.status),
    )
    .map(Value::Object);

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        changes,
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(order)))
}

fn status_fields(status: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("status".to_string(), json!(status));
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_numbers_carry_prefix_and_length() {
        let number = generate_order_number();
        assert!(number.starts_with("LK-"));
        assert_eq!(number.len(), 11);
        assert!(number[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn order_numbers_are_unique_enough() {
        let a = generate_order_number();
        let b = generate_order_number();
        assert_ne!(a, b);
    }

    #[test]
    fn status_diff_records_from_and_to() {
        let changes =
            compute_changes(&status_fields("pending"), &status_fields("confirmed")).unwrap();
        assert_eq!(changes["status"]["from"], "pending");
        assert_eq!(changes["status"]["to"], "confirmed");
    }

    #[test]
    fn unchanged_status_yields_no_diff() {
        assert!(compute_changes(&status_fields("pending"), &status_fields("pending")).is_none());
    }
}
