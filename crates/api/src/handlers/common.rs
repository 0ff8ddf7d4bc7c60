//! Small helpers shared across resource handlers.

use lakbira_core::locale::Locale;
use serde::Deserialize;

/// Query parameter accepted by every public catalogue endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    /// Display locale (`en` or `ar`). Unknown values fall back to English.
    pub locale: Option<String>,
}

impl LocaleQuery {
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or(Locale::FALLBACK)
    }
}

/// Default page size for admin listings.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for admin listings.
pub const MAX_LIMIT: i64 = 200;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let query = LocaleQuery {
            locale: Some("fr".to_string()),
        };
        assert_eq!(query.locale(), Locale::En);
    }

    #[test]
    fn limit_is_clamped() {
        let query = PageQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(query.limit(), MAX_LIMIT);
        assert_eq!(query.offset(), 0);
    }
}
