//! Repository Contract
//!
//! The uniform CRUD contract shared by persistent stores and the caching
//! decorator that wraps them. Entity-specific finders live in domain crates
//! as sub-traits of [`Repository`].

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppResult;

/// A persistable aggregate with a stable identifier.
///
/// `KIND` namespaces cache keys (`<kind>:<id>`), so it must be unique per
/// entity type and never change once data has been cached.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Display + Send + Sync + 'static;

    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

/// CRUD contract over one entity type.
///
/// Not-found is always `Ok(None)` from [`find_by_id`](LocalRepository::find_by_id),
/// never an error.
#[trait_variant::make(Repository: Send)]
pub trait LocalRepository<E: Entity> {
    /// Insert a new entity. Unique violations surface as `Conflict`.
    async fn create(&self, entity: &E) -> AppResult<()>;

    /// Replace an existing entity. A missing row surfaces as `NotFound`.
    async fn update(&self, entity: &E) -> AppResult<()>;

    /// Remove an entity. Deleting a missing row surfaces as `NotFound`.
    async fn delete(&self, id: &E::Id) -> AppResult<()>;

    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>>;
}
