//! Ownership Policy
//!
//! Decides whether an actor may touch a book. The book is loaded through
//! whatever repository the policy was built with, normally the cache-aside
//! one, so repeated checks on a hot book stay off the database.

use std::sync::Arc;

use kernel::id::{BookId, UserId};

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::error::{BookError, BookResult};

pub struct OwnershipPolicy<R>
where
    R: BookRepository,
{
    books: Arc<R>,
}

impl<R> Clone for OwnershipPolicy<R>
where
    R: BookRepository,
{
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
        }
    }
}

impl<R> OwnershipPolicy<R>
where
    R: BookRepository + Sync,
{
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }

    /// `NotFound` if the book is absent, `Forbidden` if someone else owns it.
    pub async fn check_ownership(&self, book_id: &BookId, actor: &UserId) -> BookResult<()> {
        self.authorize(book_id, actor).await.map(|_| ())
    }

    /// Same decision as [`check_ownership`](Self::check_ownership), handing
    /// back the loaded book on success.
    pub async fn authorize(&self, book_id: &BookId, actor: &UserId) -> BookResult<Book> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(BookError::NotFound)?;

        if !book.is_owned_by(actor) {
            tracing::warn!(book_id = %book_id, actor_id = %actor, "Access to foreign book denied");
            return Err(BookError::Forbidden);
        }

        Ok(book)
    }
}
