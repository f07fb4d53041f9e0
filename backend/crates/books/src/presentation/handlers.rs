//! HTTP Handlers
//!
//! The caller's [`UserId`] comes from request extensions, put there by the
//! bearer middleware in front of this router.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{BookId, UserId};
use kernel::pagination::Pagination;
use uuid::Uuid;

use crate::application::BookService;
use crate::domain::repository::BookRepository;
use crate::error::BookResult;
use crate::presentation::dto::{
    BookListResponse, BookResponse, CreateBookRequest, UpdateBookRequest,
};

pub type BookState<R> = Arc<BookService<R>>;

/// POST /api/books
pub async fn create<R>(
    State(service): State<BookState<R>>,
    Extension(user_id): Extension<UserId>,
    Json(req): Json<CreateBookRequest>,
) -> BookResult<impl IntoResponse>
where
    R: BookRepository + Sync + 'static,
{
    let book = service.create(&user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /api/books?page=&limit=
pub async fn list<R>(
    State(service): State<BookState<R>>,
    Extension(user_id): Extension<UserId>,
    Query(page): Query<Pagination>,
) -> BookResult<Json<BookListResponse>>
where
    R: BookRepository + Sync + 'static,
{
    let page = service.list(&user_id, page).await?;
    Ok(Json(page.into()))
}

/// GET /api/books/{id}
pub async fn get<R>(
    State(service): State<BookState<R>>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> BookResult<Json<BookResponse>>
where
    R: BookRepository + Sync + 'static,
{
    let book = service.get(&BookId::from_uuid(id), &user_id).await?;
    Ok(Json(book.into()))
}

/// PUT /api/books/{id}
pub async fn update<R>(
    State(service): State<BookState<R>>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> BookResult<Json<BookResponse>>
where
    R: BookRepository + Sync + 'static,
{
    let book = service
        .update(&BookId::from_uuid(id), &user_id, req.into())
        .await?;
    Ok(Json(book.into()))
}

/// DELETE /api/books/{id}
pub async fn delete<R>(
    State(service): State<BookState<R>>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> BookResult<StatusCode>
where
    R: BookRepository + Sync + 'static,
{
    service.delete(&BookId::from_uuid(id), &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
