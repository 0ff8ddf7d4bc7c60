//! Notification types, channels, and preference routing.
//!
//! A logical "send" fans out into one notification row per enabled channel.
//! Which channels are enabled is decided here: each user may have a
//! preference row carrying a boolean per (category, channel) pair, and a
//! user with no preference row receives everything they were targeted with
//! (fail-open, so users who never opened the settings page still get
//! their order updates).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The kind of event a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    OrderStatus,
    AdminAnnouncement,
    SystemAlert,
    CustomerMessage,
    Promotion,
    Reminder,
}

impl NotificationType {
    /// Column value stored in `notifications.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::OrderStatus => "order_status",
            NotificationType::AdminAnnouncement => "admin_announcement",
            NotificationType::SystemAlert => "system_alert",
            NotificationType::CustomerMessage => "customer_message",
            NotificationType::Promotion => "promotion",
            NotificationType::Reminder => "reminder",
        }
    }

    /// Parse a stored type column value.
    pub fn parse(s: &str) -> Option<NotificationType> {
        match s {
            "order_status" => Some(NotificationType::OrderStatus),
            "admin_announcement" => Some(NotificationType::AdminAnnouncement),
            "system_alert" => Some(NotificationType::SystemAlert),
            "customer_message" => Some(NotificationType::CustomerMessage),
            "promotion" => Some(NotificationType::Promotion),
            "reminder" => Some(NotificationType::Reminder),
            _ => None,
        }
    }

    /// The preference category governing this type, if any.
    ///
    /// `system_alert` and `customer_message` carry no preference flags and
    /// are always delivered.
    pub fn category(self) -> Option<PreferenceCategory> {
        match self {
            NotificationType::OrderStatus => Some(PreferenceCategory::OrderStatus),
            NotificationType::AdminAnnouncement => Some(PreferenceCategory::Announcements),
            NotificationType::Promotion => Some(PreferenceCategory::Promotions),
            NotificationType::Reminder => Some(PreferenceCategory::Reminders),
            NotificationType::SystemAlert | NotificationType::CustomerMessage => None,
        }
    }
}

/// Delivery channel for a notification row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    InApp,
    Email,
    Sms,
    Push,
}

impl Channel {
    /// Column value stored in `notifications.channel`.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::InApp => "in_app",
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }

    /// Parse a stored channel column value.
    pub fn parse(s: &str) -> Option<Channel> {
        match s {
            "in_app" => Some(Channel::InApp),
            "email" => Some(Channel::Email),
            "sms" => Some(Channel::Sms),
            "push" => Some(Channel::Push),
            _ => None,
        }
    }
}

/// Notification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Parse a stored priority column value.
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Delivery lifecycle of a single notification row.
///
/// `pending -> sent -> delivered`; `failed`/`bounced` exist in the schema
/// for future delivery-status callbacks but nothing transitions into them
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
    Bounced,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Bounced => "bounced",
        }
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Preference categories: the rows of the (category, channel) flag matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceCategory {
    OrderStatus,
    Announcements,
    Promotions,
    Reminders,
}

/// A user's notification preference flags, one boolean per
/// (category, channel) pair.
///
/// An explicit two-dimensional lookup instead of string-built field names:
/// [`PreferenceFlags::allows`] is the single source of truth for which
/// flag governs which pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceFlags {
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
}

impl Default for PreferenceFlags {
    /// Defaults for a freshly created preference row: everything in-app,
    /// email for all but reminders, push for order updates and reminders,
    /// SMS off everywhere.
    fn default() -> Self {
        Self {
            order_status_in_app: true,
            order_status_email: true,
            order_status_sms: false,
            order_status_push: true,
            announcements_in_app: true,
            announcements_email: true,
            announcements_sms: false,
            announcements_push: false,
            promotions_in_app: true,
            promotions_email: true,
            promotions_sms: false,
            promotions_push: false,
            reminders_in_app: true,
            reminders_email: false,
            reminders_sms: false,
            reminders_push: true,
        }
    }
}

impl PreferenceFlags {
    /// Look up the flag for a (category, channel) pair.
    pub fn allows(&self, category: PreferenceCategory, channel: Channel) -> bool {
        use Channel::*;
        use PreferenceCategory::*;
        match (category, channel) {
            (OrderStatus, InApp) => self.order_status_in_app,
            (OrderStatus, Email) => self.order_status_email,
            (OrderStatus, Sms) => self.order_status_sms,
            (OrderStatus, Push) => self.order_status_push,
            (Announcements, InApp) => self.announcements_in_app,
            (Announcements, Email) => self.announcements_email,
            (Announcements, Sms) => self.announcements_sms,
            (Announcements, Push) => self.announcements_push,
            (Promotions, InApp) => self.promotions_in_app,
            (Promotions, Email) => self.promotions_email,
            (Promotions, Sms) => self.promotions_sms,
            (Promotions, Push) => self.promotions_push,
            (Reminders, InApp) => self.reminders_in_app,
            (Reminders, Email) => self.reminders_email,
            (Reminders, Sms) => self.reminders_sms,
            (Reminders, Push) => self.reminders_push,
        }
    }
}

/// Filter the requested channels down to the ones enabled for delivery.
///
/// `prefs = None` means the user has never stored preferences and every
/// requested channel is enabled. Types with no preference category are
/// always enabled. Input order is preserved.
pub fn enabled_channels(
    prefs: Option<&PreferenceFlags>,
    kind: NotificationType,
    requested: &[Channel],
) -> Vec<Channel> {
    let Some(flags) = prefs else {
        return requested.to_vec();
    };

    let Some(category) = kind.category() else {
        return requested.to_vec();
    };

    requested
        .iter()
        .copied()
        .filter(|channel| flags.allows(category, *channel))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_preferences_enable_every_requested_channel() {
        let requested = [Channel::InApp, Channel::Email, Channel::Sms, Channel::Push];
        let enabled = enabled_channels(None, NotificationType::OrderStatus, &requested);
        assert_eq!(enabled, requested.to_vec());
    }

    #[test]
    fn disabled_flag_suppresses_its_channel_only() {
        let flags = PreferenceFlags {
            order_status_email: false,
            ..PreferenceFlags::default()
        };

        let enabled = enabled_channels(
            Some(&flags),
            NotificationType::OrderStatus,
            &[Channel::InApp, Channel::Email],
        );
        assert_eq!(enabled, vec![Channel::InApp]);
    }

    #[test]
    fn input_order_is_preserved() {
        let flags = PreferenceFlags::default();
        let enabled = enabled_channels(
            Some(&flags),
            NotificationType::OrderStatus,
            &[Channel::Push, Channel::InApp, Channel::Email],
        );
        assert_eq!(enabled, vec![Channel::Push, Channel::InApp, Channel::Email]);
    }

    #[test]
    fn uncategorized_types_are_always_enabled() {
        let flags = PreferenceFlags {
            order_status_in_app: false,
            announcements_in_app: false,
            promotions_in_app: false,
            reminders_in_app: false,
            ..PreferenceFlags::default()
        };

        for kind in [
            NotificationType::SystemAlert,
            NotificationType::CustomerMessage,
        ] {
            let enabled = enabled_channels(Some(&flags), kind, &[Channel::InApp]);
            assert_eq!(enabled, vec![Channel::InApp], "{kind:?} must bypass flags");
        }
    }

    #[test]
    fn default_flags_match_schema_defaults() {
        let flags = PreferenceFlags::default();
        assert!(flags.allows(PreferenceCategory::OrderStatus, Channel::Email));
        assert!(!flags.allows(PreferenceCategory::OrderStatus, Channel::Sms));
        assert!(!flags.allows(PreferenceCategory::Reminders, Channel::Email));
        assert!(flags.allows(PreferenceCategory::Reminders, Channel::Push));
        assert!(!flags.allows(PreferenceCategory::Announcements, Channel::Push));
    }

    #[test]
    fn announcement_routing_uses_announcement_flags() {
        let flags = PreferenceFlags {
            announcements_email: false,
            ..PreferenceFlags::default()
        };

        let enabled = enabled_channels(
            Some(&flags),
            NotificationType::AdminAnnouncement,
            &[Channel::InApp, Channel::Email],
        );
        assert_eq!(enabled, vec![Channel::InApp]);
    }

    #[test]
    fn all_channels_disabled_yields_empty() {
        let flags = PreferenceFlags {
            promotions_in_app: false,
            promotions_email: false,
            promotions_sms: false,
            promotions_push: false,
            ..PreferenceFlags::default()
        };

        let enabled = enabled_channels(
            Some(&flags),
            NotificationType::Promotion,
            &[Channel::InApp, Channel::Email, Channel::Sms, Channel::Push],
        );
        assert!(enabled.is_empty());
    }

    #[test]
    fn enum_column_values_round_trip() {
        for channel in [Channel::InApp, Channel::Email, Channel::Sms, Channel::Push] {
            assert_eq!(Channel::parse(channel.as_str()), Some(channel));
        }
        assert_eq!(Channel::parse("pigeon"), None);
        assert_eq!(NotificationType::OrderStatus.as_str(), "order_status");
        assert_eq!(Priority::default().as_str(), "medium");
        assert_eq!(DeliveryStatus::Pending.as_str(), "pending");
    }
}
