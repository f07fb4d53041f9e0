//! Pagination parameters for listing queries.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-based page request.
///
/// Out-of-range input is clamped rather than rejected: page `0` becomes `1`,
/// a limit of `0` becomes [`DEFAULT_PAGE_SIZE`], anything above
/// [`MAX_PAGE_SIZE`] is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = match limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        Self { page, limit }
    }

    /// Re-apply the clamping rules (useful after deserialization).
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit)
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}
