//! Handlers for the `/notifications` resource: the authenticated user's
//! in-app inbox and notification preferences.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use lakbira_core::error::CoreError;
use lakbira_core::notification::{Channel, PreferenceFlags};
use lakbira_core::types::DbId;
use lakbira_db::models::notification::{Notification, UpdatePreferences};
use lakbira_db::repositories::notification_preference_repo::NotificationPreferenceRepo;
use lakbira_db::repositories::notification_repo::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum inbox page size.
const MAX_INBOX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------------------

/// Query parameters for the inbox listing.
#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    /// Restrict to one delivery channel; absent means every channel.
    pub channel: Option<String>,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default)]
    pub include_archived: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = query.limit.unwrap_or(20).clamp(1, MAX_INBOX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let channel = match query.channel.as_deref() {
        Some(raw) => Some(
            Channel::parse(raw)
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!("Unknown channel: {raw}")))
                })?
                .as_str(),
        ),
        None => None,
    };

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        channel,
        query.unread_only,
        query.include_archived,
        limit,
        offset,
    )
    .await?;

    Ok(DataResponse::json(notifications))
}

/// Payload for the unread count endpoint.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(DataResponse::json(UnreadCount { count }))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<bool>>> {
    let updated = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(DataResponse::json(true))
}

/// POST /api/v1/notifications/{id}/archive
///
/// Soft-archive: the row is hidden from the inbox but never deleted.
pub async fn archive(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<bool>>> {
    let archived = NotificationRepo::archive(&state.pool, id, auth.user_id).await?;
    if !archived {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(DataResponse::json(true))
}

/// Payload for the mark-all-read endpoint.
#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked: u64,
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(DataResponse::json(MarkedRead { marked }))
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/preferences
///
/// A user with no stored row gets the defaults persisted on first read,
/// so the settings screen always works against a concrete row.
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PreferenceFlags>>> {
    let flags = match NotificationPreferenceRepo::find_by_user(&state.pool, auth.user_id).await? {
        Some(row) => row.flags(),
        None => {
            let row = NotificationPreferenceRepo::upsert(
                &state.pool,
                auth.user_id,
                &PreferenceFlags::default(),
            )
            .await?;
            row.flags()
        }
    };

    Ok(DataResponse::json(flags))
}

/// PUT /api/v1/notifications/preferences
///
/// Patch semantics: absent fields keep their current (or default) values.
pub async fn update_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdatePreferences>,
) -> AppResult<Json<DataResponse<PreferenceFlags>>> {
    let current = NotificationPreferenceRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .map(|row| row.flags())
        .unwrap_or_default();

    let merged = body.apply(current);
    let row = NotificationPreferenceRepo::upsert(&state.pool, auth.user_id, &merged).await?;

    tracing::info!(user_id = auth.user_id, "Notification preferences updated");

    Ok(DataResponse::json(row.flags()))
}
