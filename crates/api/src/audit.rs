//! Audit trail for mutating admin requests.
//!
//! A response-path middleware decides which requests are audited, derives
//! the action and entity from the method and path, and appends a row to
//! `audit_logs`. Writing the trail is best-effort: a failed insert is
//! logged and the response is returned unchanged, so auditing can never
//! break the request it describes.
//!
//! Handlers that know more than the URL does (entity IDs after creation,
//! before/after diffs) attach an [`AuditInfo`] to the response extensions
//! and the middleware picks it up.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;

use lakbira_core::audit::{actions, AuditStatus};
use lakbira_db::models::audit::CreateAuditLog;
use lakbira_db::repositories::audit_repo::AuditLogRepo;
use lakbira_db::repositories::user_repo::UserRepo;

use crate::auth::jwt::validate_token;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// AuditInfo
// ---------------------------------------------------------------------------

/// Detail a handler attaches to its response for the audit middleware.
#[derive(Debug, Clone, Default)]
pub struct AuditInfo {
    /// Overrides the path-derived entity type.
    pub entity_type: Option<String>,
    /// The affected entity's ID, when the handler knows it.
    pub entity_id: Option<String>,
    /// `{field: {from, to}}` diff for updates.
    pub changes: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Whether a request should produce an audit log entry.
///
/// Only mutating methods are audited, and only on the admin surface plus
/// the login endpoint. Public storefront writes (orders, registrations)
/// are business records of their own and stay out of the trail.
pub fn should_audit(method: &Method, path: &str) -> bool {
    let mutating = matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    if !mutating {
        return false;
    }
    path.contains("/admin/") || path.ends_with("/auth/login")
}

/// Derive the audit action from the method and path.
fn action_for(method: &Method, path: &str) -> &'static str {
    if path.ends_with("/auth/login") {
        return actions::LOGIN;
    }
    if path.contains("/broadcasts") && *method == Method::POST {
        return actions::BROADCAST;
    }
    match *method {
        Method::POST => actions::CREATE,
        Method::DELETE => actions::DELETE,
        _ => actions::UPDATE,
    }
}

/// Derive the entity type and (numeric) entity ID from the request path.
///
/// Looks at the segment after `admin`; unknown segments are stored as-is
/// so new resources are still attributable without a code change.
fn entity_from_path(path: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if path.ends_with("/auth/login") {
        return ("user".to_string(), None);
    }

    let after_admin = segments
        .iter()
        .position(|s| *s == "admin")
        .map(|i| &segments[i + 1..])
        .unwrap_or(&[]);

    let entity_type = match after_admin.first().copied() {
        Some("products") => "product",
        Some("collections") => "collection",
        Some("orders") => "order",
        Some("registrations") => "registration",
        Some("broadcasts") => "broadcast",
        Some(other) => return (other.to_string(), id_segment(after_admin)),
        None => return ("request".to_string(), None),
    };

    (entity_type.to_string(), id_segment(after_admin))
}

/// The first all-digit segment after the resource name, if any.
fn id_segment(segments: &[&str]) -> Option<String> {
    segments
        .iter()
        .skip(1)
        .find(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .map(|s| s.to_string())
}

/// Extract client IP and user agent from request headers.
pub fn request_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    (ip, user_agent)
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

/// Response-path middleware that appends audit log entries for mutating
/// admin requests.
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if !should_audit(&method, &path) {
        return next.run(request).await;
    }

    // Resolve the actor from the bearer token before the request is
    // consumed. Login has no token yet; its entry records no actor.
    let actor_id = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| validate_token(token, &state.config.jwt).ok())
        .map(|claims| claims.sub);

    let (ip_address, user_agent) = request_meta(request.headers());

    let response = next.run(request).await;

    let info = response
        .extensions()
        .get::<AuditInfo>()
        .cloned()
        .unwrap_or_default();

    let (path_entity, path_id) = entity_from_path(&path);
    let status = AuditStatus::from_http_status(response.status().as_u16());

    // The body has already been handed to the client, so failed entries
    // record the status line rather than the error payload.
    let error_message = match status {
        AuditStatus::Failure => Some(
            response
                .status()
                .canonical_reason()
                .map(|reason| format!("{} {reason}", response.status().as_u16()))
                .unwrap_or_else(|| response.status().as_u16().to_string()),
        ),
        AuditStatus::Success => None,
    };

    let user_email = match actor_id {
        Some(id) => UserRepo::find_by_id(&state.pool, id)
            .await
            .ok()
            .flatten()
            .map(|u| u.email),
        None => None,
    };

    let entry = CreateAuditLog {
        user_id: actor_id,
        user_email,
        action: action_for(&method, &path).to_string(),
        entity_type: info.entity_type.unwrap_or(path_entity),
        entity_id: info.entity_id.or(path_id),
        changes: info.changes,
        ip_address,
        user_agent,
        status: status.as_str().to_string(),
        error_message,
    };

    if let Err(error) = AuditLogRepo::insert(&state.pool, &entry).await {
        tracing::error!(%error, action = entry.action, "Failed to write audit log entry");
    }

    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_never_audited() {
        assert!(!should_audit(&Method::GET, "/api/v1/admin/orders"));
        assert!(!should_audit(&Method::HEAD, "/api/v1/admin/orders"));
    }

    #[test]
    fn admin_mutations_are_audited() {
        assert!(should_audit(&Method::POST, "/api/v1/admin/products"));
        assert!(should_audit(&Method::PUT, "/api/v1/admin/orders/5/status"));
        assert!(should_audit(&Method::DELETE, "/api/v1/admin/collections/3"));
    }

    #[test]
    fn public_mutations_are_not_audited() {
        assert!(!should_audit(&Method::POST, "/api/v1/orders"));
        assert!(!should_audit(&Method::POST, "/api/v1/registrations"));
    }

    #[test]
    fn login_is_audited() {
        assert!(should_audit(&Method::POST, "/api/v1/auth/login"));
    }

    #[test]
    fn action_derivation() {
        assert_eq!(action_for(&Method::POST, "/api/v1/admin/products"), "create");
        assert_eq!(
            action_for(&Method::PUT, "/api/v1/admin/orders/5/status"),
            "update"
        );
        assert_eq!(
            action_for(&Method::DELETE, "/api/v1/admin/products/2"),
            "delete"
        );
        assert_eq!(
            action_for(&Method::POST, "/api/v1/admin/broadcasts"),
            "broadcast"
        );
        assert_eq!(action_for(&Method::POST, "/api/v1/auth/login"), "login");
    }

    #[test]
    fn entity_derivation_singularizes_and_finds_id() {
        assert_eq!(
            entity_from_path("/api/v1/admin/orders/17/status"),
            ("order".to_string(), Some("17".to_string()))
        );
        assert_eq!(
            entity_from_path("/api/v1/admin/products"),
            ("product".to_string(), None)
        );
        assert_eq!(
            entity_from_path("/api/v1/auth/login"),
            ("user".to_string(), None)
        );
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        headers.insert("user-agent", "test-agent/1.0".parse().unwrap());

        let (ip, ua) = request_meta(&headers);
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(ua.as_deref(), Some("test-agent/1.0"));
    }
}
