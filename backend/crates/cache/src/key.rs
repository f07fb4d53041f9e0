//! Cache Keys
//!
//! Keys are namespaced as `<kind>:<id>`. The only way to build a [`CacheKey`]
//! is through the namespaced constructors, so two entity kinds can never
//! collide and session keys can never be mistaken for entity keys.

use std::fmt;

use kernel::repository::Entity;

const SESSION_PREFIX: &str = "session";

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `<E::KIND>:<id>`
    pub fn entity<E: Entity>(id: &E::Id) -> Self {
        Self(format!("{}:{}", E::KIND, id))
    }

    /// `session:<token>`
    pub fn session(token: &str) -> Self {
        Self(format!("{}:{}", SESSION_PREFIX, token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part of the key (`user`, `book`, `session`...)
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(ns, _)| ns)
    }
}

// Session keys embed a bearer credential; keep it out of logs.
impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace() == SESSION_PREFIX {
            write!(f, "{}:[REDACTED]", SESSION_PREFIX)
        } else {
            f.write_str(&self.0)
        }
    }
}
