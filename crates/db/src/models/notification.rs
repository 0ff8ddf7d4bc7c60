//! Notification entity models and DTOs.

use lakbira_core::notification::PreferenceFlags;
use lakbira_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table. One row per (recipient, channel)
/// of a logical send; `broadcast_id` links rows fanned out by a broadcast.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub channel: String,
    pub priority: String,
    pub title: String,
    pub title_ar: Option<String>,
    pub message: String,
    pub message_ar: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub is_archived: bool,
    pub archived_at: Option<Timestamp>,
    pub delivery_status: String,
    pub scheduled_for: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub broadcast_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert payload for a single notification row, produced by the
/// dispatcher after preference routing.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: DbId,
    pub kind: String,
    pub channel: String,
    pub priority: String,
    pub title: String,
    pub title_ar: Option<String>,
    pub message: String,
    pub message_ar: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub delivery_status: String,
    pub scheduled_for: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub broadcast_id: Option<DbId>,
}

/// A row from the `notification_preferences` table: one boolean per
/// (category, channel) pair plus bookkeeping columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreferenceRow {
    pub id: DbId,
    pub user_id: DbId,
    pub order_status_in_app: bool,
    pub order_status_email: bool,
    pub order_status_sms: bool,
    pub order_status_push: bool,
    pub announcements_in_app: bool,
    pub announcements_email: bool,
    pub announcements_sms: bool,
    pub announcements_push: bool,
    pub promotions_in_app: bool,
    pub promotions_email: bool,
    pub promotions_sms: bool,
    pub promotions_push: bool,
    pub reminders_in_app: bool,
    pub reminders_email: bool,
    pub reminders_sms: bool,
    pub reminders_push: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NotificationPreferenceRow {
    /// Project the row onto the routing flag matrix.
    pub fn flags(&self) -> PreferenceFlags {
        PreferenceFlags {
            order_status_in_app: self.order_status_in_app,
            order_status_email: self.order_status_email,
            order_status_sms: self.order_status_sms,
            order_status_push: self.order_status_push,
            announcements_in_app: self.announcements_in_app,
            announcements_email: self.announcements_email,
            announcements_sms: self.announcements_sms,
            announcements_push: self.announcements_push,
            promotions_in_app: self.promotions_in_app,
            promotions_email: self.promotions_email,
            promotions_sms: self.promotions_sms,
            promotions_push: self.promotions_push,
            reminders_in_app: self.reminders_in_app,
            reminders_email: self.reminders_email,
            reminders_sms: self.reminders_sms,
            reminders_push: self.reminders_push,
        }
    }
}

/// DTO for patching notification preferences. Absent fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePreferences {
    pub order_status_in_app: Option<bool>,
    pub order_status_email: Option<bool>,
    pub order_status_sms: Option<bool>,
    pub order_status_push: Option<bool>,
    pub announcements_in_app: Option<bool>,
    pub announcements_email: Option<bool>,
    pub announcements_sms: Option<bool>,
    pub announcements_push: Option<bool>,
    pub promotions_in_app: Option<bool>,
    pub promotions_email: Option<bool>,
    pub promotions_sms: Option<bool>,
    pub promotions_push: Option<bool>,
    pub reminders_in_app: Option<bool>,
    pub reminders_email: Option<bool>,
    pub reminders_sms: Option<bool>,
    pub reminders_push: Option<bool>,
}

impl UpdatePreferences {
    /// Apply the patch to a flag matrix, returning the merged flags.
    pub fn apply(&self, mut flags: PreferenceFlags) -> PreferenceFlags {
        macro_rules! patch {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    flags.$field = value;
                })*
            };
        }
        patch!(
            order_status_in_app,
            order_status_email,
            order_status_sms,
            order_status_push,
            announcements_in_app,
            announcements_email,
            announcements_sms,
            announcements_push,
            promotions_in_app,
            promotions_email,
            promotions_sms,
            promotions_push,
            reminders_in_app,
            reminders_email,
            reminders_sms,
            reminders_push,
        );
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_present_fields() {
        let patch = UpdatePreferences {
            order_status_email: Some(false),
            promotions_sms: Some(true),
            ..UpdatePreferences::default()
        };

        let merged = patch.apply(PreferenceFlags::default());

        assert!(!merged.order_status_email);
        assert!(merged.promotions_sms);
        // Untouched fields keep their defaults.
        assert!(merged.order_status_in_app);
        assert!(!merged.announcements_push);
    }
}
