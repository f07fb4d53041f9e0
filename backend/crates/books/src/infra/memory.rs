//! In-memory Book Repository

use std::cmp::Reverse;
use std::collections::HashMap;

use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{BookId, UserId};
use kernel::pagination::Pagination;
use kernel::repository::Repository;
use tokio::sync::RwLock;

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;

#[derive(Default)]
pub struct MemoryBookRepository {
    books: RwLock<HashMap<BookId, Book>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository<Book> for MemoryBookRepository {
    async fn create(&self, book: &Book) -> AppResult<()> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.book_id) {
            return Err(AppError::conflict("Duplicate key value"));
        }
        books.insert(book.book_id, book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<()> {
        match self.books.write().await.get_mut(&book.book_id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Book not found")),
        }
    }

    async fn delete(&self, book_id: &BookId) -> AppResult<()> {
        match self.books.write().await.remove(book_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Book not found")),
        }
    }

    async fn find_by_id(&self, book_id: &BookId) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(book_id).cloned())
    }
}

impl BookRepository for MemoryBookRepository {
    async fn list_by_owner(&self, owner_id: &UserId, page: Pagination) -> AppResult<Vec<Book>> {
        let books = self.books.read().await;

        let mut owned: Vec<&Book> = books.values().filter(|b| b.is_owned_by(owner_id)).collect();
        owned.sort_by_key(|b| (Reverse(b.created_at), *b.book_id.as_uuid()));

        Ok(owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> AppResult<u64> {
        let books = self.books.read().await;
        Ok(books.values().filter(|b| b.is_owned_by(owner_id)).count() as u64)
    }
}
