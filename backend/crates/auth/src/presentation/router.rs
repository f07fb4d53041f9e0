//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::{SessionStore, UserRepository};
use crate::presentation::handlers::{self, AuthState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router for any repository / session store pair
///
/// - `POST /register`, `POST /login`, `POST /logout` are public
/// - `GET /me` and `PUT /me` require a bearer token
pub fn auth_router<U, S>(auth: AuthState<U, S>) -> Router
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/me",
            get(handlers::me::<U, S>).put(handlers::update_me::<U, S>),
        )
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            require_bearer::<U, S>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<U, S>))
        .route("/login", post(handlers::login::<U, S>))
        .route("/logout", post(handlers::logout::<U, S>))
        .merge(protected)
        .with_state(auth)
}
