//! Locale handling and bilingual copy resolution.
//!
//! Products and collections store canonical English copy on the entity row
//! plus zero or more per-locale translation rows. [`resolve_localized_copy`]
//! picks the best available copy for a requested locale, falling back to
//! the English translation row and finally to the canonical fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// The closed set of display locales the storefront supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// The fallback locale used when a requested translation is missing.
    pub const FALLBACK: Locale = Locale::En;

    /// Column value stored in `*_translations.locale`.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Parse a stored locale column value. Unknown values map to `None`.
    pub fn parse(s: &str) -> Option<Locale> {
        match s {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Copy resolution
// ---------------------------------------------------------------------------

/// Canonical copy carried on a product or collection row.
///
/// `name` and `description` are guaranteed non-empty; `story` and `fabric`
/// are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseCopy {
    pub name: String,
    pub description: String,
    pub story: Option<String>,
    pub fabric: Option<String>,
}

/// A per-locale translation row. Every field is an optional override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleRow {
    pub locale: Locale,
    pub name: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub fabric: Option<String>,
}

/// Merge a translation row over the canonical copy, field by field.
fn merge(row: &LocaleRow, base: &BaseCopy) -> BaseCopy {
    BaseCopy {
        name: row.name.clone().unwrap_or_else(|| base.name.clone()),
        description: row
            .description
            .clone()
            .unwrap_or_else(|| base.description.clone()),
        story: row.story.clone().or_else(|| base.story.clone()),
        fabric: row.fabric.clone().or_else(|| base.fabric.clone()),
    }
}

/// Resolve the copy to display for `locale` with English fallback.
///
/// The first row matching the requested locale wins. If none matches, the
/// first English row is merged instead. If neither exists the canonical
/// copy is returned unchanged. `name` and `description` are therefore
/// always at least the canonical values.
pub fn resolve_localized_copy(
    locale: Locale,
    base: &BaseCopy,
    translations: &[LocaleRow],
) -> BaseCopy {
    if let Some(row) = translations.iter().find(|row| row.locale == locale) {
        return merge(row, base);
    }

    if let Some(row) = translations
        .iter()
        .find(|row| row.locale == Locale::FALLBACK)
    {
        return merge(row, base);
    }

    base.clone()
}

// ---------------------------------------------------------------------------
// Variant imagery grouping
// ---------------------------------------------------------------------------

/// A product variant keyed by the colour it represents.
#[derive(Debug, Clone)]
pub struct VariantRow {
    pub id: String,
    pub color_key: String,
}

/// An image attached to a variant, with an optional gallery position.
#[derive(Debug, Clone)]
pub struct VariantImageRow {
    pub variant_id: String,
    pub image_url: String,
    pub sort_order: Option<i32>,
}

/// Group variant imagery by colour for quick lookup in the client gallery.
///
/// Every variant's colour key appears in the result even when it has no
/// images. Images referencing an unknown variant are dropped. Within a
/// colour, images are ordered by `sort_order` (missing treated as 0; ties
/// keep input order).
pub fn build_images_by_color(
    variants: &[VariantRow],
    images: &[VariantImageRow],
) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<(i32, String)>> = BTreeMap::new();

    for variant in variants {
        grouped.entry(variant.color_key.clone()).or_default();
    }

    for image in images {
        let Some(variant) = variants.iter().find(|v| v.id == image.variant_id) else {
            continue;
        };
        let sort_order = image.sort_order.unwrap_or(0);
        grouped
            .entry(variant.color_key.clone())
            .or_default()
            .push((sort_order, image.image_url.clone()));
    }

    grouped
        .into_iter()
        .map(|(color_key, mut list)| {
            list.sort_by_key(|(order, _)| *order);
            (color_key, list.into_iter().map(|(_, url)| url).collect())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseCopy {
        BaseCopy {
            name: "Oasis Bloom".to_string(),
            description: "English description".to_string(),
            story: Some("English story".to_string()),
            fabric: Some("English fabric".to_string()),
        }
    }

    fn row(locale: Locale, name: &str, description: &str) -> LocaleRow {
        LocaleRow {
            locale,
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            story: None,
            fabric: None,
        }
    }

    #[test]
    fn returns_locale_specific_fields_when_available() {
        let translations = vec![
            row(Locale::En, "Oasis Bloom", "English description"),
            LocaleRow {
                locale: Locale::Ar,
                name: Some("تفتّح الواحة".to_string()),
                description: Some("وصف عربي".to_string()),
                story: Some("قصة عربية".to_string()),
                fabric: Some("نسيج عربي".to_string()),
            },
        ];

        let result = resolve_localized_copy(Locale::Ar, &base(), &translations);

        assert_eq!(result.name, "تفتّح الواحة");
        assert_eq!(result.description, "وصف عربي");
        assert_eq!(result.story.as_deref(), Some("قصة عربية"));
        assert_eq!(result.fabric.as_deref(), Some("نسيج عربي"));
    }

    #[test]
    fn falls_back_to_english_when_locale_missing() {
        let translations = vec![LocaleRow {
            locale: Locale::En,
            name: Some("English Name".to_string()),
            description: None,
            story: None,
            fabric: None,
        }];

        let result = resolve_localized_copy(Locale::Ar, &base(), &translations);

        // English name overrides, everything else merges from base.
        assert_eq!(result.name, "English Name");
        assert_eq!(result.description, "English description");
        assert_eq!(result.story.as_deref(), Some("English story"));
    }

    #[test]
    fn empty_translations_returns_base_unchanged() {
        let result = resolve_localized_copy(Locale::Ar, &base(), &[]);
        assert_eq!(result, base());
    }

    #[test]
    fn null_row_fields_merge_from_base() {
        let translations = vec![LocaleRow {
            locale: Locale::Ar,
            name: None,
            description: None,
            story: None,
            fabric: None,
        }];

        let result = resolve_localized_copy(Locale::Ar, &base(), &translations);
        assert_eq!(result, base());
    }

    #[test]
    fn first_matching_row_wins() {
        let translations = vec![
            row(Locale::Ar, "First", "First description"),
            row(Locale::Ar, "Second", "Second description"),
        ];

        let result = resolve_localized_copy(Locale::Ar, &base(), &translations);
        assert_eq!(result.name, "First");
    }

    #[test]
    fn base_without_optionals_stays_none() {
        let base = BaseCopy {
            name: "Name".to_string(),
            description: "Description".to_string(),
            story: None,
            fabric: None,
        };
        let translations = vec![LocaleRow {
            locale: Locale::Ar,
            name: Some("اسم".to_string()),
            description: None,
            story: None,
            fabric: None,
        }];

        let result = resolve_localized_copy(Locale::Ar, &base, &translations);
        assert_eq!(result.name, "اسم");
        assert_eq!(result.description, "Description");
        assert!(result.story.is_none());
        assert!(result.fabric.is_none());
    }

    #[test]
    fn groups_variant_images_by_colour_key() {
        let variants = vec![
            VariantRow {
                id: "variant-1".to_string(),
                color_key: "#ffffff".to_string(),
            },
            VariantRow {
                id: "variant-2".to_string(),
                color_key: "#000000".to_string(),
            },
        ];
        let images = vec![
            VariantImageRow {
                variant_id: "variant-1".to_string(),
                image_url: "white-2.jpg".to_string(),
                sort_order: Some(2),
            },
            VariantImageRow {
                variant_id: "variant-1".to_string(),
                image_url: "white-1.jpg".to_string(),
                sort_order: Some(1),
            },
            VariantImageRow {
                variant_id: "variant-2".to_string(),
                image_url: "black-1.jpg".to_string(),
                sort_order: Some(1),
            },
        ];

        let result = build_images_by_color(&variants, &images);

        assert_eq!(result["#ffffff"], vec!["white-1.jpg", "white-2.jpg"]);
        assert_eq!(result["#000000"], vec!["black-1.jpg"]);
    }

    #[test]
    fn variant_without_images_gets_empty_list() {
        let variants = vec![VariantRow {
            id: "variant-1".to_string(),
            color_key: "#abc123".to_string(),
        }];

        let result = build_images_by_color(&variants, &[]);
        assert!(result["#abc123"].is_empty());
    }

    #[test]
    fn image_for_unknown_variant_is_dropped() {
        let variants = vec![VariantRow {
            id: "variant-1".to_string(),
            color_key: "#ffffff".to_string(),
        }];
        let images = vec![VariantImageRow {
            variant_id: "variant-9".to_string(),
            image_url: "orphan.jpg".to_string(),
            sort_order: None,
        }];

        let result = build_images_by_color(&variants, &images);
        assert!(result["#ffffff"].is_empty());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn locale_parse_round_trips() {
        assert_eq!(Locale::parse("en"), Some(Locale::En));
        assert_eq!(Locale::parse("ar"), Some(Locale::Ar));
        assert_eq!(Locale::parse("fr"), None);
    }
}
