//! Repository for the `broadcasts` table and audience recipient queries.

use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::broadcast::{audiences, Broadcast, CreateBroadcast};
use crate::models::user::User;

/// Column list for `broadcasts` queries.
const COLUMNS: &str = "\
    id, admin_id, \"type\", priority, title, title_ar, message, message_ar, \
    link, audience, target_user_ids, channels, total_recipients, sent_count, \
    failed_count, delivered_count, status, created_at, completed_at";

/// Column list for recipient queries against `users`.
const USER_COLUMNS: &str = "\
    id, email, password_hash, name, phone, role, preferred_locale, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for broadcasts.
pub struct BroadcastRepo;

impl BroadcastRepo {
    /// Create a broadcast row in `in_progress` state.
    pub async fn create(
        pool: &PgPool,
        admin_id: Option<DbId>,
        dto: &CreateBroadcast,
        priority: &str,
        total_recipients: i32,
    ) -> Result<Broadcast, sqlx::Error> {
        let channels = serde_json::Value::from(dto.channels.clone());
        let target_user_ids = dto
            .target_user_ids
            .as_ref()
            .map(|ids| serde_json::Value::from(ids.clone()));
        let query = format!(
            "INSERT INTO broadcasts \
                 (admin_id, \"type\", priority, title, title_ar, message, message_ar, \
                  link, audience, target_user_ids, channels, total_recipients) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcast>(&query)
            .bind(admin_id)
            .bind(&dto.kind)
            .bind(priority)
            .bind(&dto.title)
            .bind(dto.title_ar.as_deref())
            .bind(&dto.message)
            .bind(dto.message_ar.as_deref())
            .bind(dto.link.as_deref())
            .bind(&dto.audience)
            .bind(target_user_ids)
            .bind(&channels)
            .bind(total_recipients)
            .fetch_one(pool)
            .await
    }

    /// Record the final outcome counters and mark the broadcast completed.
    pub async fn finalize(
        pool: &PgPool,
        id: DbId,
        sent_count: i32,
        failed_count: i32,
        delivered_count: i32,
    ) -> Result<Option<Broadcast>, sqlx::Error> {
        let query = format!(
            "UPDATE broadcasts SET \
                 sent_count = $2, failed_count = $3, delivered_count = $4, \
                 status = 'completed', completed_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcast>(&query)
            .bind(id)
            .bind(sent_count)
            .bind(failed_count)
            .bind(delivered_count)
            .fetch_optional(pool)
            .await
    }

    /// List broadcasts, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Broadcast>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM broadcasts \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Broadcast>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a broadcast by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Broadcast>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM broadcasts WHERE id = $1");
        sqlx::query_as::<_, Broadcast>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an audience to its recipient users.
    ///
    /// Order history is matched by email because orders are guest rows
    /// that only sometimes carry a `user_id`. `target_user_ids` is only
    /// consulted for the `specific_users` audience; inactive or unknown
    /// IDs are silently skipped.
    pub async fn list_recipients(
        pool: &PgPool,
        audience: &str,
        target_user_ids: &[DbId],
    ) -> Result<Vec<User>, sqlx::Error> {
        if audience == audiences::SPECIFIC_USERS {
            let query = format!(
                "SELECT {USER_COLUMNS} FROM users u \
                 WHERE u.is_active = true AND u.id = ANY($1) \
                 ORDER BY u.id ASC"
            );
            return sqlx::query_as::<_, User>(&query)
                .bind(target_user_ids)
                .fetch_all(pool)
                .await;
        }

        let query = match audience {
            audiences::WITH_ORDERS => format!(
                "SELECT {USER_COLUMNS} FROM users u \
                 WHERE u.is_active = true AND EXISTS( \
                     SELECT 1 FROM orders o WHERE LOWER(o.customer_email) = LOWER(u.email)) \
                 ORDER BY u.id ASC"
            ),
            audiences::WITHOUT_ORDERS => format!(
                "SELECT {USER_COLUMNS} FROM users u \
                 WHERE u.is_active = true AND NOT EXISTS( \
                     SELECT 1 FROM orders o WHERE LOWER(o.customer_email) = LOWER(u.email)) \
                 ORDER BY u.id ASC"
            ),
            _ => format!(
                "SELECT {USER_COLUMNS} FROM users u \
                 WHERE u.is_active = true \
                 ORDER BY u.id ASC"
            ),
        };
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
