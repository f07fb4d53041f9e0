//! PostgreSQL Book Repository

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{BookId, UserId};
use kernel::pagination::Pagination;
use kernel::repository::Repository;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{BookAuthor, BookTitle};

/// Soft-deleting book repository
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<Book> for PgBookRepository {
    async fn create(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (
                id,
                owner_id,
                title,
                author,
                description,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(book.book_id.as_uuid())
        .bind(book.owner_id.as_uuid())
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.description.as_deref())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE books SET
                title = $2,
                author = $3,
                description = $4,
                updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(book.book_id.as_uuid())
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.description.as_deref())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found("Book not found"));
        }
        Ok(())
    }

    async fn delete(&self, book_id: &BookId) -> AppResult<()> {
        let affected = sqlx::query(
            "UPDATE books SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(book_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found("Book not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, book_id: &BookId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, owner_id, title, author, description, created_at, updated_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(book_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Book::from))
    }
}

impl BookRepository for PgBookRepository {
    async fn list_by_owner(&self, owner_id: &UserId, page: Pagination) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, owner_id, title, author, description, created_at, updated_at
            FROM books
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(i64::from(page.limit))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    author: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            book_id: BookId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: BookTitle::from_db(row.title),
            author: BookAuthor::from_db(row.author),
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
