//! Audit logging constants and the before/after change diff.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API middleware and the repository layer.

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known action values for audit log entries, derived from the HTTP method
/// of the mutating request.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const LOGIN: &str = "login";
    pub const BROADCAST: &str = "broadcast";
}

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

/// Known entity types referenced by audit log entries.
pub mod entity_types {
    pub const PRODUCT: &str = "product";
    pub const COLLECTION: &str = "collection";
    pub const ORDER: &str = "order";
    pub const REGISTRATION: &str = "registration";
    pub const BROADCAST: &str = "broadcast";
    pub const USER: &str = "user";
}

// ---------------------------------------------------------------------------
// Outcome status
// ---------------------------------------------------------------------------

/// Whether the audited request succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Failure,
}

impl AuditStatus {
    /// Column value stored in `audit_logs.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Success => "success",
            AuditStatus::Failure => "failure",
        }
    }

    /// Classify an HTTP status code.
    pub fn from_http_status(code: u16) -> AuditStatus {
        if code < 400 {
            AuditStatus::Success
        } else {
            AuditStatus::Failure
        }
    }
}

// ---------------------------------------------------------------------------
// Change diff
// ---------------------------------------------------------------------------

/// Diff two JSON object snapshots into a `{field: {from, to}}` map.
///
/// Keys from both snapshots are considered; a key missing on one side is
/// treated as `null`. Equal values are omitted. Returns `None` when nothing
/// changed, so callers can store a SQL `NULL` instead of an empty object.
pub fn compute_changes(old: &Map<String, Value>, new: &Map<String, Value>) -> Option<Map<String, Value>> {
    let mut changes = Map::new();

    for (key, old_value) in old {
        let new_value = new.get(key).unwrap_or(&Value::Null);
        if old_value != new_value {
            changes.insert(
                key.clone(),
                serde_json::json!({ "from": old_value, "to": new_value }),
            );
        }
    }

    for (key, new_value) in new {
        if !old.contains_key(key) && !new_value.is_null() {
            changes.insert(
                key.clone(),
                serde_json::json!({ "from": Value::Null, "to": new_value }),
            );
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn changed_field_records_from_and_to() {
        let old = obj(serde_json::json!({"status": "pending", "total": "120.00"}));
        let new = obj(serde_json::json!({"status": "confirmed", "total": "120.00"}));

        let changes = compute_changes(&old, &new).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes["status"],
            serde_json::json!({"from": "pending", "to": "confirmed"})
        );
    }

    #[test]
    fn identical_snapshots_yield_none() {
        let snapshot = obj(serde_json::json!({"name": "Oasis Bloom", "price": "95.00"}));
        assert_eq!(compute_changes(&snapshot, &snapshot.clone()), None);
    }

    #[test]
    fn added_field_diffs_against_null() {
        let old = obj(serde_json::json!({}));
        let new = obj(serde_json::json!({"tracking_number": "TRK-1"}));

        let changes = compute_changes(&old, &new).unwrap();
        assert_eq!(
            changes["tracking_number"],
            serde_json::json!({"from": null, "to": "TRK-1"})
        );
    }

    #[test]
    fn removed_field_diffs_to_null() {
        let old = obj(serde_json::json!({"notes": "gift wrap"}));
        let new = obj(serde_json::json!({}));

        let changes = compute_changes(&old, &new).unwrap();
        assert_eq!(
            changes["notes"],
            serde_json::json!({"from": "gift wrap", "to": null})
        );
    }

    #[test]
    fn nested_values_compare_structurally() {
        let old = obj(serde_json::json!({"colors": [{"hex": "#aaa"}]}));
        let new = obj(serde_json::json!({"colors": [{"hex": "#aaa"}]}));
        assert_eq!(compute_changes(&old, &new), None);

        let changed = obj(serde_json::json!({"colors": [{"hex": "#bbb"}]}));
        assert!(compute_changes(&old, &changed).is_some());
    }

    #[test]
    fn status_classification() {
        assert_eq!(AuditStatus::from_http_status(200), AuditStatus::Success);
        assert_eq!(AuditStatus::from_http_status(302), AuditStatus::Success);
        assert_eq!(AuditStatus::from_http_status(404), AuditStatus::Failure);
        assert_eq!(AuditStatus::from_http_status(500), AuditStatus::Failure);
    }
}
