//! Bearer-token authentication for handler extractors.
//!
//! Storefront customers and the dashboard admin share one credential
//! format: an HS256 access token carrying the user id and role, issued by
//! the `/auth` endpoints. [`AuthUser`] establishes the caller's identity
//! before the handler body runs, rejecting with a 401 when the header is
//! absent, malformed, or carries a token that fails validation.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use lakbira_core::error::CoreError;
use lakbira_core::roles::ROLE_ADMIN;
use lakbira_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller identity established from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Internal database id of the caller (token `sub`).
    pub user_id: DbId,
    /// Role name carried in the token.
    pub role: String,
}

impl AuthUser {
    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Pull the bearer token out of the `Authorization` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let token = parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Expected an `Authorization: Bearer <token>` header".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn extracts_the_token_after_the_bearer_prefix() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_and_non_bearer_headers() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
    }

    #[test]
    fn admin_check_follows_the_role_name() {
        let admin = AuthUser {
            user_id: 1,
            role: ROLE_ADMIN.to_string(),
        };
        let customer = AuthUser {
            user_id: 2,
            role: "user".to_string(),
        };
        assert!(admin.is_admin());
        assert!(!customer.is_admin());
    }
}
