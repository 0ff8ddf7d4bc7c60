//! Notification dispatcher: routes a logical send through the recipient's
//! preference flags and fans it out into one notification row per enabled
//! channel.
//!
//! The in-app row is the source of truth; side-channel sends (email, SMS,
//! push) are best-effort and never fail the dispatch.

use chrono::Utc;
use sqlx::PgPool;

use lakbira_core::locale::Locale;
use lakbira_core::notification::{
    enabled_channels, Channel, DeliveryStatus, NotificationType, Priority,
};
use lakbira_core::types::{DbId, Timestamp};
use lakbira_db::models::notification::NewNotification;
use lakbira_db::repositories::notification_preference_repo::NotificationPreferenceRepo;
use lakbira_db::repositories::notification_repo::NotificationRepo;
use lakbira_db::repositories::user_repo::UserRepo;

use crate::email::EmailDelivery;
use crate::templates;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for dispatch failures.
///
/// Side-channel delivery failures are deliberately absent: they are logged
/// and swallowed. Only the database write can fail a dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// SendOptions
// ---------------------------------------------------------------------------

/// Parameters for one logical notification send.
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub user_id: DbId,
    pub kind: NotificationType,
    pub title: String,
    pub title_ar: Option<String>,
    pub message: String,
    pub message_ar: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub channels: Vec<Channel>,
    pub priority: Priority,
    pub scheduled_for: Option<Timestamp>,
    pub broadcast_id: Option<DbId>,
}

impl SendOptions {
    /// A send with the default channel set (in-app only) and medium
    /// priority.
    pub fn new(
        user_id: DbId,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            title_ar: None,
            message: message.into(),
            message_ar: None,
            link: None,
            metadata: None,
            channels: vec![Channel::InApp],
            priority: Priority::Medium,
            scheduled_for: None,
            broadcast_id: None,
        }
    }
}

/// Delivery bookkeeping for a new row: scheduled sends start `pending`
/// with no timestamps; immediate sends are recorded `sent` and treated
/// as delivered in the same breath.
fn delivery_fields(
    scheduled_for: Option<Timestamp>,
    now: Timestamp,
) -> (DeliveryStatus, Option<Timestamp>, Option<Timestamp>) {
    match scheduled_for {
        Some(at) if at > now => (DeliveryStatus::Pending, None, None),
        _ => (DeliveryStatus::Sent, Some(now), Some(now)),
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes and persists notifications, with optional email delivery.
pub struct Dispatcher {
    pool: PgPool,
    email: Option<EmailDelivery>,
}

impl Dispatcher {
    /// Create a dispatcher. `email = None` disables the email side channel;
    /// email rows are still written so the fan-out record stays complete.
    pub fn new(pool: PgPool, email: Option<EmailDelivery>) -> Self {
        Self { pool, email }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Send a notification to one user across the requested channels.
    ///
    /// Returns the IDs of the created notification rows, in channel order.
    /// An empty result means every requested channel was disabled by the
    /// recipient's preferences.
    pub async fn send(&self, options: SendOptions) -> Result<Vec<DbId>, DispatchError> {
        let prefs = NotificationPreferenceRepo::find_by_user(&self.pool, options.user_id)
            .await?
            .map(|row| row.flags());

        let enabled = enabled_channels(prefs.as_ref(), options.kind, &options.channels);
        if enabled.is_empty() {
            tracing::debug!(
                user_id = options.user_id,
                kind = options.kind.as_str(),
                "All requested channels disabled by preferences"
            );
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let (status, sent_at, delivered_at) = delivery_fields(options.scheduled_for, now);

        let rows: Vec<NewNotification> = enabled
            .iter()
            .map(|channel| NewNotification {
                user_id: options.user_id,
                kind: options.kind.as_str().to_string(),
                channel: channel.as_str().to_string(),
                priority: options.priority.as_str().to_string(),
                title: options.title.clone(),
                title_ar: options.title_ar.clone(),
                message: options.message.clone(),
                message_ar: options.message_ar.clone(),
                link: options.link.clone(),
                metadata: options.metadata.clone(),
                delivery_status: status.as_str().to_string(),
                scheduled_for: options.scheduled_for,
                sent_at,
                delivered_at,
                broadcast_id: options.broadcast_id,
            })
            .collect();

        let created = NotificationRepo::insert_batch(&self.pool, &rows).await?;
        let ids: Vec<DbId> = created.iter().map(|n| n.id).collect();

        // Side-channel sends only for immediate dispatches.
        if status == DeliveryStatus::Sent {
            for channel in &enabled {
                match channel {
                    Channel::Email => self.deliver_email(&options).await,
                    Channel::Sms | Channel::Push => {
                        tracing::debug!(
                            user_id = options.user_id,
                            channel = channel.as_str(),
                            "No provider configured for channel, row recorded only"
                        );
                    }
                    Channel::InApp => {}
                }
            }
        }

        Ok(ids)
    }

    /// Send the order status notification for a transition, on the in-app
    /// and email channels.
    pub async fn send_order_status(
        &self,
        user_id: DbId,
        order_id: DbId,
        order_number: &str,
        status: &str,
    ) -> Result<Vec<DbId>, DispatchError> {
        let (message_en, message_ar) = templates::order_status_message(status);

        let options = SendOptions {
            title_ar: Some(format!("الطلب {order_number} - {message_ar}")),
            message_ar: Some(message_ar.to_string()),
            link: Some(format!("/orders/{order_id}")),
            metadata: Some(serde_json::json!({
                "orderId": order_id,
                "orderNumber": order_number,
                "status": status,
            })),
            channels: vec![Channel::InApp, Channel::Email],
            priority: if status == "delivered" {
                Priority::High
            } else {
                Priority::Medium
            },
            ..SendOptions::new(
                user_id,
                NotificationType::OrderStatus,
                format!("Order {order_number} - {status}"),
                message_en,
            )
        };

        self.send(options).await
    }

    /// Best-effort transactional email to an address with no account
    /// (guest checkouts, launch registrations). Failures are logged and
    /// never propagated.
    pub async fn send_guest_email(&self, to_email: &str, copy: &templates::EmailCopy) {
        let Some(email) = &self.email else {
            tracing::debug!(to = to_email, "Email delivery not configured");
            return;
        };
        if let Err(error) = email.send(to_email, &copy.subject, &copy.body).await {
            tracing::warn!(to = to_email, %error, "Transactional email failed");
        }
    }

    /// Best-effort email rendition of a notification. Failures are logged
    /// and never propagated.
    async fn deliver_email(&self, options: &SendOptions) {
        let Some(email) = &self.email else {
            tracing::debug!(user_id = options.user_id, "Email delivery not configured");
            return;
        };

        let user = match UserRepo::find_by_id(&self.pool, options.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(user_id = options.user_id, "Email recipient not found");
                return;
            }
            Err(error) => {
                tracing::warn!(user_id = options.user_id, %error, "Email recipient lookup failed");
                return;
            }
        };

        let locale = Locale::parse(&user.preferred_locale).unwrap_or(Locale::FALLBACK);
        let copy = templates::notification_email(
            locale,
            &options.title,
            options.title_ar.as_deref(),
            &options.message,
            options.message_ar.as_deref(),
        );

        if let Err(error) = email.send(&user.email, &copy.subject, &copy.body).await {
            tracing::warn!(
                user_id = options.user_id,
                to = user.email,
                %error,
                "Notification email failed"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn immediate_send_is_marked_sent_and_delivered() {
        let now = Utc::now();
        let (status, sent_at, delivered_at) = delivery_fields(None, now);
        assert_eq!(status, DeliveryStatus::Sent);
        assert_eq!(sent_at, Some(now));
        assert_eq!(delivered_at, Some(now));
    }

    #[test]
    fn future_schedule_stays_pending() {
        let now = Utc::now();
        let (status, sent_at, delivered_at) = delivery_fields(Some(now + Duration::hours(2)), now);
        assert_eq!(status, DeliveryStatus::Pending);
        assert!(sent_at.is_none());
        assert!(delivered_at.is_none());
    }

    #[test]
    fn past_schedule_sends_immediately() {
        let now = Utc::now();
        let (status, _, _) = delivery_fields(Some(now - Duration::minutes(5)), now);
        assert_eq!(status, DeliveryStatus::Sent);
    }

    #[test]
    fn default_options_target_in_app_only() {
        let options = SendOptions::new(7, NotificationType::Promotion, "Sale", "Everything is off");
        assert_eq!(options.channels, vec![Channel::InApp]);
        assert_eq!(options.priority, Priority::Medium);
        assert!(options.broadcast_id.is_none());
    }
}
