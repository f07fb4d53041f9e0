//! Book Entity

use chrono::{DateTime, Utc};
use kernel::id::{BookId, UserId};
use kernel::repository::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{BookAuthor, BookTitle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    /// Set at creation, never changes
    pub owner_id: UserId,
    pub title: BookTitle,
    pub author: BookAuthor,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated partial update. `None` leaves a field unchanged.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<BookTitle>,
    pub author: Option<BookAuthor>,
    pub description: Option<Option<String>>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.description.is_none()
    }
}

impl Book {
    pub fn new(
        owner_id: UserId,
        title: BookTitle,
        author: BookAuthor,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            book_id: BookId::new(),
            owner_id,
            title,
            author,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Apply a patch. `updated_at` only moves when something was set.
    pub fn apply(&mut self, patch: BookPatch) {
        if patch.is_empty() {
            return;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

impl Entity for Book {
    type Id = BookId;
    const KIND: &'static str = "book";

    fn id(&self) -> &BookId {
        &self.book_id
    }
}
