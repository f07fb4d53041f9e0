//! Cache-aside specialization for users
//!
//! CRUD goes through [`CacheAsideRepository`]. Email lookups pass straight
//! through to the wrapped repository.

use cache::{CacheAsideRepository, KvStore};
use kernel::error::app_error::AppResult;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;

impl<R, K> UserRepository for CacheAsideRepository<User, R, K>
where
    R: UserRepository + Sync,
    K: KvStore + Sync,
{
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        self.inner().find_by_email(email).await
    }
}
