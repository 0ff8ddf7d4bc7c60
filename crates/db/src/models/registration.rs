//! Launch-interest registration models and DTOs.

use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `registrations` table: a visitor who asked to be told
/// when a collection launches.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// Registration statuses stored in `registrations.status`.
pub mod registration_statuses {
    pub const NEW: &str = "new";
    pub const CONTACTED: &str = "contacted";
    pub const CONVERTED: &str = "converted";

    pub const ALL: &[&str] = &[NEW, CONTACTED, CONVERTED];
}

/// DTO for submitting a registration.
#[derive(Debug, Deserialize)]
pub struct CreateRegistration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
}
