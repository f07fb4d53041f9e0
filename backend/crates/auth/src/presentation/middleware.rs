//! Auth Middleware
//!
//! Bearer authentication for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthState;

/// Middleware that requires a valid bearer token
///
/// On success the caller's [`kernel::id::UserId`] is inserted into request
/// extensions for downstream handlers (`Extension<UserId>`).
///
/// ```ignore
/// router.route_layer(axum::middleware::from_fn_with_state(
///     authenticator.clone(),
///     require_bearer::<U, S>,
/// ))
/// ```
pub async fn require_bearer<U, S>(
    State(auth): State<AuthState<U, S>>,
    mut req: Request,
    next: Next,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let token = platform::bearer::extract_bearer(req.headers())
        .map(str::to_owned)
        .ok_or(AuthError::InvalidSession)?;
    let user_id = auth.validate_token(&token).await?;

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
