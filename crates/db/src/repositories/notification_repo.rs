//! Repository for the `notifications` table.

use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries. `type` is quoted because it is
/// a reserved word.
const COLUMNS: &str = "\
    id, user_id, \"type\", channel, priority, title, title_ar, message, \
    message_ar, link, metadata, is_read, read_at, is_archived, archived_at, \
    delivery_status, scheduled_for, sent_at, delivered_at, broadcast_id, \
    created_at";

/// Column list for INSERT (excludes auto-generated columns).
const INSERT_COLUMNS: &str = "\
    user_id, \"type\", channel, priority, title, title_ar, message, \
    message_ar, link, metadata, delivery_status, scheduled_for, sent_at, \
    delivered_at, broadcast_id";

/// Number of bind parameters per inserted row.
const INSERT_PARAMS: u32 = 15;

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Batch insert notification rows (one per recipient-channel pair).
    ///
    /// Uses a single INSERT with multiple value rows. Returns the created
    /// rows in insertion order.
    pub async fn insert_batch(
        pool: &PgPool,
        rows: &[NewNotification],
    ) -> Result<Vec<Notification>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = format!("INSERT INTO notifications ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in rows {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..INSERT_PARAMS {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        query.push_str(&format!(" RETURNING {COLUMNS}"));

        let mut q = sqlx::query_as::<_, Notification>(&query);
        for row in rows {
            q = q
                .bind(row.user_id)
                .bind(&row.kind)
                .bind(&row.channel)
                .bind(&row.priority)
                .bind(&row.title)
                .bind(&row.title_ar)
                .bind(&row.message)
                .bind(&row.message_ar)
                .bind(&row.link)
                .bind(&row.metadata)
                .bind(&row.delivery_status)
                .bind(row.scheduled_for)
                .bind(row.sent_at)
                .bind(row.delivered_at)
                .bind(row.broadcast_id);
        }

        q.fetch_all(pool).await
    }

    /// List a user's notifications, newest first.
    ///
    /// Rows from every channel are returned by default; side-channel rows
    /// double as a delivery history. Pass `channel` to restrict to one
    /// channel (the inbox UI passes `in_app`). When `unread_only` is `true`,
    /// only notifications with `is_read = false` are returned. Archived
    /// notifications are hidden unless `include_archived` is set.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        channel: Option<&str>,
        unread_only: bool,
        include_archived: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let channel_filter = if channel.is_some() {
            "AND channel = $4"
        } else {
            ""
        };
        let unread_filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let archived_filter = if include_archived {
            ""
        } else {
            "AND is_archived = false"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 {channel_filter} {unread_filter} {archived_filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let mut q = sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset);
        if let Some(channel) = channel {
            q = q.bind(channel);
        }
        q.fetch_all(pool).await
    }

    /// Get the number of unread in-app notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND channel = 'in_app' \
               AND is_read = false AND is_archived = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification exists for the given user. Marking
    /// an already-read notification succeeds again without moving `read_at`.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&flag_update_sql("is_read", "read_at"))
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-archive a notification. Archived rows are hidden from the
    /// inbox but never deleted.
    ///
    /// Returns `true` if the notification exists for the given user.
    /// Re-archiving is a no-op that still succeeds.
    pub async fn archive(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&flag_update_sql("is_archived", "archived_at"))
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

/// Build the UPDATE for a single per-row state flag.
///
/// The WHERE clause matches on id and owner only, never on the flag's
/// current value, so repeating the call matches the same row again and the
/// caller keeps reporting success. The timestamp is set once via COALESCE.
fn flag_update_sql(flag: &str, stamped_at: &str) -> String {
    format!(
        "UPDATE notifications \
         SET {flag} = true, {stamped_at} = COALESCE({stamped_at}, NOW()) \
         WHERE id = $1 AND user_id = $2"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mark_read_matches_the_same_row() {
        let sql = flag_update_sql("is_read", "read_at");
        // No flag-state guard: an already-read row still matches, so a
        // second mark-read reports success instead of "not found".
        assert!(sql.ends_with("WHERE id = $1 AND user_id = $2"));
        assert!(!sql.contains("is_read = false"));
    }

    #[test]
    fn read_timestamp_is_set_only_once() {
        let sql = flag_update_sql("is_read", "read_at");
        assert!(sql.contains("read_at = COALESCE(read_at, NOW())"));
    }

    #[test]
    fn repeat_archive_matches_the_same_row() {
        let sql = flag_update_sql("is_archived", "archived_at");
        assert!(sql.ends_with("WHERE id = $1 AND user_id = $2"));
        assert!(sql.contains("archived_at = COALESCE(archived_at, NOW())"));
        assert!(!sql.contains("is_archived = false"));
    }
}
