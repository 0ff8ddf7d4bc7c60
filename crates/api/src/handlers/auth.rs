//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use lakbira_core::error::CoreError;
use lakbira_core::locale::Locale;
use lakbira_core::roles::ROLE_USER;
use lakbira_db::models::user::{CreateUser, UpdateUser, User};
use lakbira_db::repositories::user_repo::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum accepted password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response payload for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue an access token. Returns the same 401 for
/// an unknown email and a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &body.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let verified = verify_password(&body.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(DataResponse::json(LoginResponse { token, user }))
}

/// POST /api/v1/auth/register
///
/// Create a customer account and log it in. A duplicate email surfaces as
/// a 409 via the unique constraint on `users.email`.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    if body.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "email is required".into(),
        )));
    }
    validate_password_strength(&body.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        body.email.trim(),
        &password_hash,
        body.name.as_deref(),
        body.phone.as_deref(),
        ROLE_USER,
    )
    .await?;

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "Account created");

    Ok(DataResponse::json(LoginResponse { token, user }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(DataResponse::json(user))
}

/// PUT /api/v1/auth/me
///
/// Patch the authenticated user's profile. Absent fields are left as-is.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(locale) = body.preferred_locale.as_deref() {
        if Locale::parse(locale).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unsupported locale: {locale}"
            ))));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(DataResponse::json(user))
}
