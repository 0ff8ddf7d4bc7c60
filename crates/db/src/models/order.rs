//! Order entity models and DTOs.

use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `orders` table.
///
/// Orders are placed as a guest checkout: `user_id` is set only when the
/// customer email matches a registered account at creation time. `items`
/// is a JSONB array of line-item snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub user_id: Option<DbId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub city: Option<String>,
    pub notes: Option<String>,
    pub items: serde_json::Value,
    pub total_cents: i64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order statuses stored in `orders.status`.
pub mod order_statuses {
    pub const PENDING: &str = "pending";
    pub const CONFIRMED: &str = "confirmed";
    pub const PROCESSING: &str = "processing";
    pub const SHIPPED: &str = "shipped";
    pub const DELIVERED: &str = "delivered";
    pub const CANCELLED: &str = "cancelled";

    /// All accepted status values, for request validation.
    pub const ALL: &[&str] = &[PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED, CANCELLED];
}

/// DTO for placing an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub city: Option<String>,
    pub notes: Option<String>,
    pub items: serde_json::Value,
    pub total_cents: i64,
}

/// DTO for an admin status update.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
}
