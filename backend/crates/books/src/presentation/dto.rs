//! API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{BookPage, CreateBookInput, UpdateBookInput};
use crate::domain::entity::Book;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateBookRequest> for CreateBookInput {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
        }
    }
}

/// Partial update: omitted fields are untouched, an empty description
/// clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateBookRequest> for UpdateBookInput {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.book_id.into_uuid(),
            owner_id: book.owner_id.into_uuid(),
            title: book.title.to_string(),
            author: book.author.to_string(),
            description: book.description,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub items: Vec<BookResponse>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl From<BookPage> for BookListResponse {
    fn from(page: BookPage) -> Self {
        Self {
            items: page.items.into_iter().map(BookResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}
