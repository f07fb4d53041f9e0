//! Cache-Aside Repository
//!
//! Generic decorator that adds read-through caching and write-invalidation
//! in front of any [`Repository`].
//!
//! ## Rules
//! - `find_by_id`: cache first; on miss (or any cache failure) read the inner
//!   repository and populate best-effort with the configured TTL
//! - `create`: persist, then invalidate the new key; never populate
//! - `update`: persist, then invalidate; never re-populate
//! - `delete`: invalidate, persist the delete, invalidate again
//!
//! Reads degrade to the inner repository when the cache misbehaves. Failed
//! invalidations that could leave a stale entry behind are reported as
//! internal errors.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};
use kernel::repository::{Entity, Repository};

use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::store::KvStore;

pub struct CacheAsideRepository<E, R, K> {
    inner: Arc<R>,
    store: Arc<K>,
    ttl: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, K> Clone for CacheAsideRepository<E, R, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            store: Arc::clone(&self.store),
            ttl: self.ttl,
            _entity: PhantomData,
        }
    }
}

impl<E, R, K> CacheAsideRepository<E, R, K>
where
    E: Entity,
    R: Repository<E> + Sync,
    K: KvStore + Sync,
{
    pub fn new(inner: Arc<R>, store: Arc<K>, config: &CacheConfig) -> Self {
        Self {
            inner,
            store,
            ttl: config.entity_ttl,
            _entity: PhantomData,
        }
    }

    /// The wrapped repository, for queries that bypass the cache.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn read_cached(&self, key: &CacheKey) -> Option<E> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Cache read failed, falling back to store");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    async fn populate(&self, key: &CacheKey, entity: &E) {
        let result = match serde_json::to_string(entity) {
            Ok(json) => self.store.set(key, json, self.ttl).await,
            Err(e) => Err(CacheError::from(e)),
        };

        if let Err(e) = result {
            tracing::warn!(cache_key = %key, error = %e, "Cache populate failed");
        }
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.store.delete(key).await.map_err(|e| {
            tracing::error!(cache_key = %key, error = %e, "Cache invalidation failed");
            AppError::from(e)
        })
    }
}

impl<E, R, K> Repository<E> for CacheAsideRepository<E, R, K>
where
    E: Entity,
    R: Repository<E> + Sync,
    K: KvStore + Sync,
{
    async fn create(&self, entity: &E) -> AppResult<()> {
        self.inner.create(entity).await?;

        // A fresh identifier cannot have a live entry written through this
        // layer, so a failure here is not worth failing the create.
        let key = CacheKey::entity::<E>(entity.id());
        if let Err(e) = self.store.delete(&key).await {
            tracing::warn!(cache_key = %key, error = %e, "Cache invalidation after create failed");
        }
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        self.inner.update(entity).await?;
        self.invalidate(&CacheKey::entity::<E>(entity.id())).await
    }

    async fn delete(&self, id: &E::Id) -> AppResult<()> {
        let key = CacheKey::entity::<E>(id);

        self.invalidate(&key).await?;
        self.inner.delete(id).await?;
        // A read between the first invalidation and the delete may have
        // repopulated the key from the old row.
        self.invalidate(&key).await
    }

    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        let key = CacheKey::entity::<E>(id);

        if let Some(entity) = self.read_cached(&key).await {
            tracing::debug!(cache_key = %key, "Cache hit");
            return Ok(Some(entity));
        }

        tracing::debug!(cache_key = %key, "Cache miss");
        let found = self.inner.find_by_id(id).await?;

        if let Some(entity) = &found {
            self.populate(&key, entity).await;
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheResult;
    use crate::memory::MemoryStore;
    use kernel::error::kind::ErrorKind;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    // ========================================================================
    // Fixtures
    // ========================================================================

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        body: String,
    }

    impl Entity for Note {
        type Id = Uuid;
        const KIND: &'static str = "note";

        fn id(&self) -> &Uuid {
            &self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            body: body.to_string(),
        }
    }

    /// Source of truth that counts `find_by_id` calls.
    #[derive(Default)]
    struct CountingRepo {
        rows: Mutex<HashMap<Uuid, Note>>,
        reads: AtomicUsize,
    }

    impl CountingRepo {
        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn contains(&self, id: &Uuid) -> bool {
            self.rows.lock().unwrap().contains_key(id)
        }
    }

    impl Repository<Note> for CountingRepo {
        async fn create(&self, entity: &Note) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&entity.id) {
                return Err(AppError::conflict("Duplicate key value"));
            }
            rows.insert(entity.id, entity.clone());
            Ok(())
        }

        async fn update(&self, entity: &Note) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&entity.id) {
                Some(row) => {
                    *row = entity.clone();
                    Ok(())
                }
                None => Err(AppError::not_found("Record not found")),
            }
        }

        async fn delete(&self, id: &Uuid) -> AppResult<()> {
            match self.rows.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(AppError::not_found("Record not found")),
            }
        }

        async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Note>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }
    }

    /// Memory store with switchable failures.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
        /// Deletes that succeed before every further delete fails
        delete_budget: Mutex<Option<usize>>,
    }

    impl FlakyStore {
        fn fail_deletes_after(&self, successes: usize) {
            *self.delete_budget.lock().unwrap() = Some(successes);
        }

        fn down(msg: &str) -> CacheError {
            CacheError::Unavailable(msg.to_string())
        }
    }

    impl KvStore for FlakyStore {
        async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> CacheResult<()> {
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(Self::down("set"));
            }
            self.inner.set(key, value, ttl).await
        }

        async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(Self::down("get"));
            }
            self.inner.get(key).await
        }

        async fn delete(&self, key: &CacheKey) -> CacheResult<()> {
            {
                let mut budget = self.delete_budget.lock().unwrap();
                match budget.as_mut() {
                    Some(0) => return Err(Self::down("delete")),
                    Some(n) => *n -= 1,
                    None => {}
                }
            }
            self.inner.delete(key).await
        }
    }

    struct Fixture {
        repo: Arc<CountingRepo>,
        store: Arc<FlakyStore>,
        cached: CacheAsideRepository<Note, CountingRepo, FlakyStore>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(CountingRepo::default());
        let store = Arc::new(FlakyStore::default());
        let cached = CacheAsideRepository::new(repo.clone(), store.clone(), &CacheConfig::default());
        Fixture {
            repo,
            store,
            cached,
        }
    }

    // ========================================================================
    // Read-through
    // ========================================================================

    #[tokio::test]
    async fn test_create_then_find_returns_entity() {
        let f = fixture();
        let n = note("first");

        assert_ok!(f.cached.create(&n).await);
        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn test_second_read_is_cache_hit() {
        let f = fixture();
        let n = note("hit me");
        f.cached.create(&n).await.unwrap();

        let first = f.cached.find_by_id(&n.id).await.unwrap();
        let second = f.cached.find_by_id(&n.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.repo.reads(), 1);
    }

    #[tokio::test]
    async fn test_create_does_not_populate() {
        let f = fixture();
        let n = note("lazy");
        f.cached.create(&n).await.unwrap();

        let key = CacheKey::entity::<Note>(&n.id);
        assert_eq!(f.store.inner.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_entity_is_none_and_not_cached() {
        let f = fixture();
        let id = Uuid::new_v4();

        assert_eq!(f.cached.find_by_id(&id).await.unwrap(), None);
        assert_eq!(f.cached.find_by_id(&id).await.unwrap(), None);
        assert_eq!(f.repo.reads(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let f = fixture();
        let n = note("ttl");
        f.cached.create(&n).await.unwrap();

        f.cached.find_by_id(&n.id).await.unwrap();
        tokio::time::advance(crate::config::DEFAULT_ENTITY_TTL - Duration::from_secs(1)).await;
        f.cached.find_by_id(&n.id).await.unwrap();
        assert_eq!(f.repo.reads(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        f.cached.find_by_id(&n.id).await.unwrap();
        assert_eq!(f.repo.reads(), 2);
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    #[tokio::test]
    async fn test_update_invalidates_cached_copy() {
        let f = fixture();
        let mut n = note("v1");
        f.cached.create(&n).await.unwrap();
        f.cached.find_by_id(&n.id).await.unwrap();

        n.body = "v2".to_string();
        assert_ok!(f.cached.update(&n).await);

        let key = CacheKey::entity::<Note>(&n.id);
        assert_eq!(f.store.inner.get(&key).await.unwrap(), None);

        let found = f.cached.find_by_id(&n.id).await.unwrap().unwrap();
        assert_eq!(found.body, "v2");
    }

    #[tokio::test]
    async fn test_delete_removes_cached_copy() {
        let f = fixture();
        let n = note("doomed");
        f.cached.create(&n).await.unwrap();
        f.cached.find_by_id(&n.id).await.unwrap();

        assert_ok!(f.cached.delete(&n.id).await);
        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_clears_preexisting_entry() {
        let f = fixture();
        let n = note("fresh");
        let stale = Note {
            id: n.id,
            body: "stale".to_string(),
        };
        let key = CacheKey::entity::<Note>(&n.id);
        f.store
            .inner
            .set(&key, serde_json::to_string(&stale).unwrap(), Duration::from_secs(60))
            .await
            .unwrap();

        f.cached.create(&n).await.unwrap();
        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_cache_untouched() {
        let f = fixture();
        let n = note("orig");
        f.cached.create(&n).await.unwrap();
        f.cached.find_by_id(&n.id).await.unwrap();

        let ghost = note("never stored");
        let err = f.cached.update(&ghost).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // The real entry is still served from cache
        f.cached.find_by_id(&n.id).await.unwrap();
        assert_eq!(f.repo.reads(), 1);
    }

    // ========================================================================
    // Degraded cache
    // ========================================================================

    #[tokio::test]
    async fn test_read_error_falls_back_to_store() {
        let f = fixture();
        let n = note("fallback");
        f.cached.create(&n).await.unwrap();
        f.store.fail_get.store(true, Ordering::SeqCst);

        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n.clone()));
        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n));
        assert_eq!(f.repo.reads(), 2);
    }

    #[tokio::test]
    async fn test_populate_failure_does_not_fail_read() {
        let f = fixture();
        let n = note("no room");
        f.cached.create(&n).await.unwrap();
        f.store.fail_set.store(true, Ordering::SeqCst);

        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_treated_as_miss() {
        let f = fixture();
        let n = note("healthy");
        f.cached.create(&n).await.unwrap();

        let key = CacheKey::entity::<Note>(&n.id);
        f.store
            .inner
            .set(&key, "{garbage".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(f.cached.find_by_id(&n.id).await.unwrap(), Some(n.clone()));
        assert_eq!(f.repo.reads(), 1);

        // Repopulated with a decodable value
        let raw = f.store.inner.get(&key).await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Note>(&raw).unwrap(), n);
    }

    #[tokio::test]
    async fn test_create_tolerates_invalidation_failure() {
        let f = fixture();
        f.store.fail_deletes_after(0);
        let n = note("created anyway");

        assert_ok!(f.cached.create(&n).await);
        assert!(f.repo.contains(&n.id));
    }

    #[tokio::test]
    async fn test_update_surfaces_invalidation_failure() {
        let f = fixture();
        let mut n = note("v1");
        f.cached.create(&n).await.unwrap();
        f.store.fail_deletes_after(0);

        n.body = "v2".to_string();
        let err = f.cached.update(&n).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[tokio::test]
    async fn test_delete_aborts_when_first_invalidation_fails() {
        let f = fixture();
        let n = note("survivor");
        f.cached.create(&n).await.unwrap();
        f.store.fail_deletes_after(0);

        let err = f.cached.delete(&n.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert!(f.repo.contains(&n.id));
    }

    #[tokio::test]
    async fn test_delete_surfaces_second_invalidation_failure() {
        let f = fixture();
        let n = note("half gone");
        f.cached.create(&n).await.unwrap();
        f.store.fail_deletes_after(1);

        let err = f.cached.delete(&n.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert!(!f.repo.contains(&n.id));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let f = fixture();
        let result = f.cached.delete(&Uuid::new_v4()).await;
        let err = assert_err!(result);
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
