//! Driving port for category reads.

use async_trait::async_trait;
use pagination::Filter;

use crate::domain::{Category, Error};

/// Category read use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesQuery: Send + Sync {
    /// List categories after validating `filter` against the category
    /// allow-list.
    async fn list(&self, filter: Filter) -> Result<Vec<Category>, Error>;

    /// Fetch one category, failing `not_found` when absent.
    async fn get(&self, id: i64) -> Result<Category, Error>;
}
