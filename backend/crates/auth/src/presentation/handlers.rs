//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::id::UserId;

use crate::application::authenticator::Authenticator;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserResponse,
};

/// Shared state for auth handlers
pub type AuthState<U, S> = Arc<Authenticator<U, S>>;

const TOKEN_TYPE: &str = "bearer";

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<U, S>(
    State(auth): State<AuthState<U, S>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let profile = auth.register(req.name, req.email, req.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(profile))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<U, S>(
    State(auth): State<AuthState<U, S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let output = auth.login(req.email, req.password).await?;

    Ok(Json(LoginResponse {
        access_token: output.token.as_str().to_string(),
        token_type: TOKEN_TYPE,
        expires_in: auth.config().session_ttl_secs(),
        user: output.user.into(),
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Succeeds for unknown or already revoked tokens. Only a missing
/// `Authorization` header is rejected.
pub async fn logout<U, S>(
    State(auth): State<AuthState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let token = platform::bearer::extract_bearer(&headers).ok_or(AuthError::InvalidSession)?;
    auth.logout(token).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me (behind `require_bearer`)
pub async fn me<U, S>(
    State(auth): State<AuthState<U, S>>,
    Extension(user_id): Extension<UserId>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let profile = auth.get_user_by_id(&user_id).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/auth/me (behind `require_bearer`)
pub async fn update_me<U, S>(
    State(auth): State<AuthState<U, S>>,
    Extension(user_id): Extension<UserId>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let profile = auth.update_profile(&user_id, req.name, req.email).await?;
    Ok(Json(profile.into()))
}
