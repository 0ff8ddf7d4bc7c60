//! Repository for the `registrations` table.

use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{CreateRegistration, Registration};

/// Column list for `registrations` queries.
const COLUMNS: &str = "id, name, email, phone, city, status, created_at";

/// Provides CRUD operations for launch-interest registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Create a registration.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (name, email, phone, city) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(dto.phone.as_deref())
            .bind(dto.city.as_deref())
            .fetch_one(pool)
            .await
    }

    /// List registrations, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a registration's follow-up status.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
