//! Repository Traits

use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use kernel::pagination::Pagination;
use kernel::repository::Repository;

use crate::domain::entity::Book;

/// Book repository trait
///
/// Listing and counting always read the source of truth; only
/// `find_by_id` may be served from the entity cache.
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository: Repository<Book> {
    /// One page of the owner's live books, newest first
    async fn list_by_owner(&self, owner_id: &UserId, page: Pagination) -> AppResult<Vec<Book>>;

    async fn count_by_owner(&self, owner_id: &UserId) -> AppResult<u64>;
}
