//! Bilingual email copy for transactional sends.

use lakbira_core::locale::Locale;

/// Subject and plain-text body of an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCopy {
    pub subject: String,
    pub body: String,
}

/// Copy for the order confirmation email.
pub fn order_confirmation(locale: Locale, client_name: &str, reference: &str) -> EmailCopy {
    match locale {
        Locale::Ar => EmailCopy {
            subject: "لاكبيرة - تم استلام طلبك".to_string(),
            body: [
                format!("مرحباً {client_name},"),
                "نؤكد استلام طلبك من لاكبيرة.".to_string(),
                format!("رقم الطلب: {reference}."),
                "سنقوم بالتواصل معك خلال 48 ساعة لتأكيد التفاصيل.".to_string(),
                "مع خالص التحية،".to_string(),
                "فريق لاكبيرة".to_string(),
            ]
            .join("\n"),
        },
        Locale::En => EmailCopy {
            subject: "La Kbira - We've received your order".to_string(),
            body: [
                format!("Hi {client_name},"),
                "Thank you for your La Kbira order.".to_string(),
                format!("Your reference number is {reference}."),
                "Our team will reach out within 48 hours to confirm your details.".to_string(),
                "Warm regards,".to_string(),
                "La Kbira Concierge".to_string(),
            ]
            .join("\n"),
        },
    }
}

/// Copy for the launch-interest registration confirmation email.
pub fn registration_confirmation(locale: Locale, client_name: &str, reference: &str) -> EmailCopy {
    let lines = match locale {
        Locale::Ar => vec![
            format!("أهلاً {client_name},"),
            "تم تسجيلك بنجاح في لاكبيرة.".to_string(),
            format!("رقم تسجيلك: {reference}."),
            "سنتواصل معك قريباً بخصوص الخطوات التالية.".to_string(),
            "مع التقدير،".to_string(),
            "فريق لاكبيرة".to_string(),
        ],
        Locale::En => vec![
            format!("Hello {client_name},"),
            "Your La Kbira registration is confirmed.".to_string(),
            format!("Registration ID: {reference}."),
            "We'll reach out shortly with next steps.".to_string(),
            "With appreciation,".to_string(),
            "The La Kbira Team".to_string(),
        ],
    };

    EmailCopy {
        subject: match locale {
            Locale::Ar => "لاكبيرة - تم تأكيد التسجيل".to_string(),
            Locale::En => "La Kbira - Registration confirmed".to_string(),
        },
        body: lines.join("\n"),
    }
}

/// The bilingual status line shown in an order status notification.
///
/// Unknown statuses fall back to the pending copy.
pub fn order_status_message(status: &str) -> (&'static str, &'static str) {
    match status {
        "confirmed" => ("Your order has been confirmed!", "تم تأكيد طلبك!"),
        "processing" => ("Your order is being crafted", "جاري تفصيل طلبك"),
        "shipped" => ("Your order has been shipped", "تم شحن طلبك"),
        "delivered" => ("Your order has been delivered", "تم توصيل طلبك"),
        "cancelled" => ("Your order has been cancelled", "تم إلغاء طلبك"),
        _ => ("Your order is pending approval", "طلبك قيد الموافقة"),
    }
}

/// Compose the email rendition of a notification, preferring the
/// recipient's locale and falling back to English copy.
pub fn notification_email(
    locale: Locale,
    title: &str,
    title_ar: Option<&str>,
    message: &str,
    message_ar: Option<&str>,
) -> EmailCopy {
    let (subject_line, body_line) = match locale {
        Locale::Ar => (title_ar.unwrap_or(title), message_ar.unwrap_or(message)),
        Locale::En => (title, message),
    };

    EmailCopy {
        subject: format!("La Kbira - {subject_line}"),
        body: body_line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_confirmation_localizes_subject_and_body() {
        let en = order_confirmation(Locale::En, "Leila", "ORD-42");
        assert!(en.subject.contains("received your order"));
        assert!(en.body.contains("Hi Leila,"));
        assert!(en.body.contains("ORD-42"));

        let ar = order_confirmation(Locale::Ar, "ليلى", "ORD-42");
        assert!(ar.subject.contains("لاكبيرة"));
        assert!(ar.body.contains("ليلى"));
        assert!(ar.body.contains("ORD-42"));
    }

    #[test]
    fn registration_confirmation_includes_reference() {
        let copy = registration_confirmation(Locale::En, "Yasmine", "REG-7");
        assert_eq!(copy.subject, "La Kbira - Registration confirmed");
        assert!(copy.body.contains("Registration ID: REG-7."));
    }

    #[test]
    fn unknown_order_status_falls_back_to_pending() {
        let (en, _ar) = order_status_message("teleported");
        assert_eq!(en, "Your order is pending approval");
    }

    #[test]
    fn notification_email_prefers_arabic_when_available() {
        let copy = notification_email(
            Locale::Ar,
            "New collection",
            Some("تشكيلة جديدة"),
            "Discover the new pieces",
            Some("اكتشفي القطع الجديدة"),
        );
        assert_eq!(copy.subject, "La Kbira - تشكيلة جديدة");
        assert_eq!(copy.body, "اكتشفي القطع الجديدة");
    }

    #[test]
    fn notification_email_falls_back_to_english() {
        let copy = notification_email(Locale::Ar, "New collection", None, "Discover", None);
        assert_eq!(copy.subject, "La Kbira - New collection");
        assert_eq!(copy.body, "Discover");
    }
}
