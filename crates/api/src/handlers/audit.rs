//! Handlers for the admin `/audit-logs` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use lakbira_db::models::audit::{AuditLog, AuditQuery};
use lakbira_db::repositories::audit_repo::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Paginated audit log response.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub data: Vec<AuditLog>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/v1/admin/audit-logs
///
/// Filterable, paginated view over the append-only trail. The trail
/// itself is never exposed for mutation.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let logs = AuditLogRepo::query(&state.pool, &params).await?;
    let total = AuditLogRepo::count(&state.pool, &params).await?;

    Ok(Json(AuditLogPage {
        data: logs,
        total,
        limit: params.limit.unwrap_or(50).min(500),
        offset: params.offset.unwrap_or(0),
    }))
}
