//! Fabric colour swatch normalization and default-selection resolution.
//!
//! Colour records come from admin input (`"#D4AF37 Gold"` style free text)
//! and from JSONB columns, so hex values are sanitized before they reach
//! CSS consumers, and entities whose hex cannot be salvaged are dropped
//! from the palette entirely.

use serde::{Deserialize, Serialize};

/// A selectable fabric colour with optional bilingual labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricColor {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "nameAr")]
    pub name_ar: Option<String>,
}

/// Sanitize a hex colour string into `#` plus hex digits.
///
/// Leading `#` characters and every non-hex-digit character are stripped;
/// whatever digits remain are kept as-is. No length validation is applied
/// (3-, 6-, and 8-digit strings all pass through), which is intentionally
/// permissive. Returns `None` when no hex digits survive.
pub fn normalise_fabric_hex(hex: Option<&str>) -> Option<String> {
    let trimmed = hex?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stripped = trimmed.trim_start_matches('#');
    let digits: String = stripped.chars().filter(char::is_ascii_hexdigit).collect();

    if digits.is_empty() {
        return None;
    }

    Some(format!("#{digits}"))
}

/// Determine which fabric colour should be treated as the active selection.
///
/// Entries whose hex fails [`normalise_fabric_hex`] are dropped from
/// consideration. The previously selected colour wins when its hex still
/// matches an available entry (case-insensitively); the matching entry from
/// `available` is returned, not `current_selection`, so callers always get
/// the palette's labels. A stale or absent selection falls back to the
/// first valid entry, in caller-given order.
pub fn resolve_default_fabric_color<'a>(
    available: &'a [FabricColor],
    current_selection: Option<&FabricColor>,
) -> Option<&'a FabricColor> {
    let valid: Vec<&FabricColor> = available
        .iter()
        .filter(|color| normalise_fabric_hex(Some(&color.hex)).is_some())
        .collect();

    if valid.is_empty() {
        return None;
    }

    if let Some(selection) = current_selection {
        let selection_hex = selection.hex.trim().to_lowercase();
        if !selection_hex.is_empty() {
            if let Some(matching) = valid
                .iter()
                .find(|color| color.hex.trim().to_lowercase() == selection_hex)
                .copied()
            {
                return Some(matching);
            }
        }
    }

    valid.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> FabricColor {
        FabricColor {
            hex: hex.to_string(),
            name: None,
            name_ar: None,
        }
    }

    #[test]
    fn strips_extra_hashes_and_whitespace() {
        assert_eq!(
            normalise_fabric_hex(Some("  ##D4af37 ")),
            Some("#D4af37".to_string())
        );
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(normalise_fabric_hex(Some("")), None);
        assert_eq!(normalise_fabric_hex(Some("   ")), None);
        assert_eq!(normalise_fabric_hex(None), None);
    }

    #[test]
    fn garbage_input_is_none() {
        assert_eq!(normalise_fabric_hex(Some("##!!")), None);
        assert_eq!(normalise_fabric_hex(Some("#zzz")), None);
    }

    #[test]
    fn mixed_input_keeps_hex_digits_only() {
        assert_eq!(
            normalise_fabric_hex(Some("#fa!ke5")),
            Some("#fa5".to_string())
        );
    }

    #[test]
    fn short_and_long_hex_pass_through() {
        // No length validation by design.
        assert_eq!(normalise_fabric_hex(Some("#abc")), Some("#abc".to_string()));
        assert_eq!(
            normalise_fabric_hex(Some("#aabbccdd")),
            Some("#aabbccdd".to_string())
        );
    }

    #[test]
    fn normalisation_is_idempotent() {
        for input in ["  ##D4af37 ", "#abc", "f5c6d6", "##!!", ""] {
            let once = normalise_fabric_hex(Some(input));
            let twice = normalise_fabric_hex(once.as_deref());
            assert_eq!(once, twice, "idempotence broken for {input:?}");
        }
    }

    #[test]
    fn stored_selection_wins_case_insensitively() {
        let available = vec![color("#AAA"), color("#BBB")];
        let selection = color("#bbb");

        let resolved = resolve_default_fabric_color(&available, Some(&selection)).unwrap();

        // The entry from `available` is returned, not the stale selection.
        assert_eq!(resolved.hex, "#BBB");
        assert!(std::ptr::eq(resolved, &available[1]));
    }

    #[test]
    fn stale_selection_falls_back_to_first() {
        let available = vec![color("#f5c6d6"), color("#f1ede8")];
        let stale = color("#3a9d5d");

        let resolved = resolve_default_fabric_color(&available, Some(&stale)).unwrap();
        assert_eq!(resolved.hex, "#f5c6d6");
    }

    #[test]
    fn no_selection_falls_back_to_first() {
        let available = vec![color("#f5c6d6"), color("#f1ede8")];
        let resolved = resolve_default_fabric_color(&available, None).unwrap();
        assert_eq!(resolved.hex, "#f5c6d6");
    }

    #[test]
    fn invalid_entries_are_dropped_entirely() {
        let available = vec![color("##!!"), color("#f1ede8")];
        let resolved = resolve_default_fabric_color(&available, None).unwrap();
        assert_eq!(resolved.hex, "#f1ede8");
    }

    #[test]
    fn empty_palette_resolves_to_none() {
        assert!(resolve_default_fabric_color(&[], None).is_none());
        let all_invalid = vec![color(""), color("##!!")];
        assert!(resolve_default_fabric_color(&all_invalid, None).is_none());
    }
}
