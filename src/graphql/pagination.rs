//! Offset pagination arguments for list queries

use async_graphql::InputObject;

/// `limit` / `offset` arguments of every list query.
///
/// Values are taken as given: only missing (or zero) values fall back to
/// defaults.
#[derive(InputObject, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[graphql(name = "PageArgs")]
pub struct PageArgs {
    /// Maximum number of items to return
    pub limit: Option<i32>,
    /// Number of items to skip
    pub offset: Option<i32>,
}

impl PageArgs {
    pub fn new(limit: Option<i32>, offset: Option<i32>) -> Self {
        Self { limit, offset }
    }

    /// Number of records to skip, defaulting to 0
    pub fn skip(&self) -> i64 {
        self.offset.map(i64::from).unwrap_or(0)
    }

    /// Number of records to take. A missing or zero limit means `default_limit`.
    pub fn take(&self, default_limit: i64) -> i64 {
        self.limit
            .filter(|limit| *limit != 0)
            .map(i64::from)
            .unwrap_or(default_limit)
    }
}
