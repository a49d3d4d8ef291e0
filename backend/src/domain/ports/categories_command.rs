//! Driving port for category mutations.

use async_trait::async_trait;

use crate::domain::{CategoryDraft, Error};

/// Category write use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesCommand: Send + Sync {
    /// Validate and insert a category, returning its id.
    async fn create(&self, draft: CategoryDraft) -> Result<i64, Error>;

    /// Validate and replace a category's content.
    async fn update(&self, id: i64, draft: CategoryDraft) -> Result<(), Error>;

    /// Delete a category; absent rows are not an error.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
