//! Broadcast entity models and DTOs.

use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `broadcasts` table: an admin-initiated send to an
/// audience, with per-recipient outcome counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Broadcast {
    pub id: DbId,
    pub admin_id: Option<DbId>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub title: String,
    pub title_ar: Option<String>,
    pub message: String,
    pub message_ar: Option<String>,
    pub link: Option<String>,
    pub audience: String,
    pub target_user_ids: Option<serde_json::Value>,
    pub channels: serde_json::Value,
    pub total_recipients: i32,
    pub sent_count: i32,
    pub failed_count: i32,
    pub delivered_count: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Broadcast audiences stored in `broadcasts.audience`.
pub mod audiences {
    pub const ALL_USERS: &str = "all_users";
    pub const WITH_ORDERS: &str = "with_orders";
    pub const WITHOUT_ORDERS: &str = "without_orders";
    pub const SPECIFIC_USERS: &str = "specific_users";

    pub const ALL: &[&str] = &[ALL_USERS, WITH_ORDERS, WITHOUT_ORDERS, SPECIFIC_USERS];
}

/// Broadcast statuses stored in `broadcasts.status`.
pub mod broadcast_statuses {
    pub const IN_PROGRESS: &str = "in_progress";
    pub const COMPLETED: &str = "completed";
}

/// DTO for creating a broadcast.
#[derive(Debug, Deserialize)]
pub struct CreateBroadcast {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Option<String>,
    pub title: String,
    pub title_ar: Option<String>,
    pub message: String,
    pub message_ar: Option<String>,
    pub link: Option<String>,
    pub audience: String,
    /// Explicit recipient IDs for the `specific_users` audience.
    pub target_user_ids: Option<Vec<DbId>>,
    pub channels: Vec<String>,
}
