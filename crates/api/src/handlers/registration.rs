//! Handlers for the `/registrations` resource (launch-interest sign-ups).

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use lakbira_core::error::CoreError;
use lakbira_core::types::DbId;
use lakbira_db::models::registration::{registration_statuses, CreateRegistration, Registration};
use lakbira_db::repositories::registration_repo::RegistrationRepo;
use lakbira_notify::templates;

use crate::audit::AuditInfo;
use crate::error::{AppError, AppResult};
use crate::handlers::common::{LocaleQuery, PageQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/registrations
///
/// Register interest in the launch. The confirmation email is best-effort.
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
    Json(body): Json<CreateRegistration>,
) -> AppResult<Json<DataResponse<Registration>>> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and email are required".into(),
        )));
    }

    let registration = RegistrationRepo::create(&state.pool, &body).await?;
    tracing::info!(registration_id = registration.id, "Registration received");

    let reference = format!("REG-{}", registration.id);
    let copy = templates::registration_confirmation(query.locale(), &registration.name, &reference);
    state
        .dispatcher
        .send_guest_email(&registration.email, &copy)
        .await;

    Ok(DataResponse::json(registration))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/registrations
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    let registrations =
        RegistrationRepo::list(&state.pool, page.limit(), page.offset()).await?;
    Ok(DataResponse::json(registrations))
}

/// Request body for a follow-up status update.
#[derive(Debug, Deserialize)]
pub struct UpdateRegistrationStatus {
    pub status: String,
}

/// PUT /api/v1/admin/registrations/{id}/status
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRegistrationStatus>,
) -> AppResult<(Extension<AuditInfo>, Json<DataResponse<Registration>>)> {
    if !registration_statuses::ALL.contains(&body.status.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown registration status '{}'",
            body.status
        ))));
    }

    let registration = RegistrationRepo::update_status(&state.pool, id, &body.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))?;

    let info = AuditInfo {
        entity_id: Some(id.to_string()),
        changes: Some(serde_json::json!({
            "status": { "to": registration.status }
        })),
        ..Default::default()
    };
    Ok((Extension(info), DataResponse::json(registration)))
}
