//! Handlers for the admin `/broadcasts` resource.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use lakbira_core::error::CoreError;
use lakbira_core::types::DbId;
use lakbira_db::models::broadcast::{Broadcast, CreateBroadcast};
use lakbira_db::repositories::broadcast_repo::BroadcastRepo;
use lakbira_notify::send_broadcast;

use crate::audit::AuditInfo;
use crate::error::{AppError, AppResult};
use crate::handlers::common::PageQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/broadcasts
///
/// Fan a notification out to an audience. The response carries the final
/// outcome counters; a recipient failure is counted, not propagated.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateBroadcast>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Broadcast>>)> {
    if body.title.trim().is_empty() || body.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title and message are required".into(),
        )));
    }

    let broadcast = send_broadcast(&state.dispatcher, Some(admin.user_id), &body).await?;

    let info = AuditInfo {
        entity_id: Some(broadcast.id.to_string()),
        changes: Some(serde_json::json!({
            "audience": broadcast.audience,
            "totalRecipients": broadcast.total_recipients,
            "sentCount": broadcast.sent_count,
            "failedCount": broadcast.failed_count,
        })),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(broadcast)))
}

/// GET /api/v1/admin/broadcasts
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<DataResponse<Vec<Broadcast>>>> {
    let broadcasts = BroadcastRepo::list(&state.pool, page.limit(), page.offset()).await?;
    Ok(DataResponse::json(broadcasts))
}

/// GET /api/v1/admin/broadcasts/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Broadcast>>> {
    let broadcast = BroadcastRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Broadcast",
            id,
        }))?;

    Ok(DataResponse::json(broadcast))
}
