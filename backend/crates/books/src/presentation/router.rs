//! Books Router

use axum::{Router, routing::get};

use crate::domain::repository::BookRepository;
use crate::presentation::handlers::{self, BookState};

/// Create the books router
///
/// Every route reads the caller's `UserId` from request extensions. Requests
/// without one are rejected by axum with 500, so mount this behind the
/// bearer middleware.
pub fn books_router<R>(service: BookState<R>) -> Router
where
    R: BookRepository + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list::<R>).post(handlers::create::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
        .with_state(service)
}
