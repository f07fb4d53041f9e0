//! Cache-aside specialization for books
//!
//! Only single-book reads are cached. Listing and counting go straight to
//! the wrapped repository.

use cache::{CacheAsideRepository, KvStore};
use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use kernel::pagination::Pagination;

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;

impl<R, K> BookRepository for CacheAsideRepository<Book, R, K>
where
    R: BookRepository + Sync,
    K: KvStore + Sync,
{
    async fn list_by_owner(&self, owner_id: &UserId, page: Pagination) -> AppResult<Vec<Book>> {
        self.inner().list_by_owner(owner_id, page).await
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> AppResult<u64> {
        self.inner().count_by_owner(owner_id).await
    }
}
