//! Repository for the `notification_preferences` table.

use lakbira_core::notification::PreferenceFlags;
use lakbira_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationPreferenceRow;

/// Column list for `notification_preferences` queries.
const COLUMNS: &str = "\
    id, user_id, \
    order_status_in_app, order_status_email, order_status_sms, order_status_push, \
    announcements_in_app, announcements_email, announcements_sms, announcements_push, \
    promotions_in_app, promotions_email, promotions_sms, promotions_push, \
    reminders_in_app, reminders_email, reminders_sms, reminders_push, \
    created_at, updated_at";

/// Provides lookup and upsert for per-user notification preferences.
pub struct NotificationPreferenceRepo;

impl NotificationPreferenceRepo {
    /// Find a user's preference row. `None` means the user never stored
    /// preferences; routing treats that as everything enabled.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<NotificationPreferenceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_preferences WHERE user_id = $1");
        sqlx::query_as::<_, NotificationPreferenceRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the preference row for a user with the given
    /// flag matrix.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        flags: &PreferenceFlags,
    ) -> Result<NotificationPreferenceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences \
                 (user_id, \
                  order_status_in_app, order_status_email, order_status_sms, order_status_push, \
                  announcements_in_app, announcements_email, announcements_sms, announcements_push, \
                  promotions_in_app, promotions_email, promotions_sms, promotions_push, \
                  reminders_in_app, reminders_email, reminders_sms, reminders_push) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 order_status_in_app = EXCLUDED.order_status_in_app, \
                 order_status_email = EXCLUDED.order_status_email, \
                 order_status_sms = EXCLUDED.order_status_sms, \
                 order_status_push = EXCLUDED.order_status_push, \
                 announcements_in_app = EXCLUDED.announcements_in_app, \
                 announcements_email = EXCLUDED.announcements_email, \
                 announcements_sms = EXCLUDED.announcements_sms, \
                 announcements_push = EXCLUDED.announcements_push, \
                 promotions_in_app = EXCLUDED.promotions_in_app, \
                 promotions_email = EXCLUDED.promotions_email, \
                 promotions_sms = EXCLUDED.promotions_sms, \
                 promotions_push = EXCLUDED.promotions_push, \
                 reminders_in_app = EXCLUDED.reminders_in_app, \
                 reminders_email = EXCLUDED.reminders_email, \
                 reminders_sms = EXCLUDED.reminders_sms, \
                 reminders_push = EXCLUDED.reminders_push, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreferenceRow>(&query)
            .bind(user_id)
            .bind(flags.order_status_in_app)
            .bind(flags.order_status_email)
            .bind(flags.order_status_sms)
            .bind(flags.order_status_push)
            .bind(flags.announcements_in_app)
            .bind(flags.announcements_email)
            .bind(flags.announcements_sms)
            .bind(flags.announcements_push)
            .bind(flags.promotions_in_app)
            .bind(flags.promotions_email)
            .bind(flags.promotions_sms)
            .bind(flags.promotions_push)
            .bind(flags.reminders_in_app)
            .bind(flags.reminders_email)
            .bind(flags.reminders_sms)
            .bind(flags.reminders_push)
            .fetch_one(pool)
            .await
    }
}
