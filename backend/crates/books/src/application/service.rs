//! Book Service
//!
//! CRUD over the caller's own books. Every operation on an existing book
//! goes through the [`OwnershipPolicy`] first.

use std::sync::Arc;

use kernel::id::{BookId, UserId};
use kernel::pagination::Pagination;

use crate::application::ownership::OwnershipPolicy;
use crate::domain::entity::{Book, BookPatch};
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{BookAuthor, BookTitle, normalize_description};
use crate::error::{BookError, BookResult};

/// Unvalidated create input
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

/// Unvalidated partial update. Absent fields are left as they are.
#[derive(Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl UpdateBookInput {
    fn validate(self) -> BookResult<BookPatch> {
        Ok(BookPatch {
            title: self
                .title
                .as_deref()
                .map(BookTitle::new)
                .transpose()
                .map_err(validation)?,
            author: self
                .author
                .as_deref()
                .map(BookAuthor::new)
                .transpose()
                .map_err(validation)?,
            description: self
                .description
                .as_deref()
                .map(|d| normalize_description(Some(d))),
        })
    }
}

#[derive(Debug, Clone)]
pub struct BookPage {
    pub items: Vec<Book>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

fn validation(err: kernel::error::app_error::AppError) -> BookError {
    BookError::Validation(err.message().to_string())
}

pub struct BookService<R>
where
    R: BookRepository,
{
    books: Arc<R>,
    policy: OwnershipPolicy<R>,
}

impl<R> BookService<R>
where
    R: BookRepository + Sync,
{
    pub fn new(books: Arc<R>) -> Self {
        let policy = OwnershipPolicy::new(books.clone());
        Self { books, policy }
    }

    pub fn policy(&self) -> &OwnershipPolicy<R> {
        &self.policy
    }

    pub async fn create(&self, owner_id: &UserId, input: CreateBookInput) -> BookResult<Book> {
        let title = BookTitle::new(&input.title).map_err(validation)?;
        let author = BookAuthor::new(&input.author).map_err(validation)?;
        let description = normalize_description(input.description.as_deref());

        let book = Book::new(*owner_id, title, author, description);
        self.books.create(&book).await?;

        tracing::info!(book_id = %book.book_id, owner_id = %owner_id, "Book created");
        Ok(book)
    }

    pub async fn get(&self, book_id: &BookId, actor: &UserId) -> BookResult<Book> {
        self.policy.authorize(book_id, actor).await
    }

    /// Validates the input before touching storage.
    pub async fn update(
        &self,
        book_id: &BookId,
        actor: &UserId,
        input: UpdateBookInput,
    ) -> BookResult<Book> {
        let patch = input.validate()?;
        let mut book = self.policy.authorize(book_id, actor).await?;

        if patch.is_empty() {
            return Ok(book);
        }

        book.apply(patch);
        self.books.update(&book).await?;

        tracing::info!(book_id = %book_id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, book_id: &BookId, actor: &UserId) -> BookResult<()> {
        self.policy.check_ownership(book_id, actor).await?;
        self.books.delete(book_id).await?;

        tracing::info!(book_id = %book_id, "Book deleted");
        Ok(())
    }

    pub async fn list(&self, owner_id: &UserId, page: Pagination) -> BookResult<BookPage> {
        let page = page.normalized();
        let items = self.books.list_by_owner(owner_id, page).await?;
        let total = self.books.count_by_owner(owner_id).await?;

        Ok(BookPage {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    pub async fn check_ownership(&self, book_id: &BookId, actor: &UserId) -> BookResult<()> {
        self.policy.check_ownership(book_id, actor).await
    }
}
