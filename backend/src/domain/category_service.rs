//! Category domain service.
//!
//! Implements [`CategoriesQuery`] and [`CategoriesCommand`] over a
//! [`CategoryRepository`]. Every repository call runs under the configured
//! query deadline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::Filter;

use crate::domain::deadline::with_deadline;
use crate::domain::listing::normalize_filter;
use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CategoryRepository, CategoryRepositoryError,
};
use crate::domain::{CATEGORY_SORTABLE_FIELDS, Category, CategoryDraft, Error};

/// Message reported when a category lookup misses.
pub const CATEGORY_NOT_FOUND: &str = "Category not found.";

/// Category service implementing the category driving ports.
#[derive(Clone)]
pub struct CategoryService<R> {
    repo: Arc<R>,
    query_timeout: Duration,
}

impl<R> CategoryService<R> {
    /// Create a service whose repository calls give up after `query_timeout`.
    pub fn new(repo: Arc<R>, query_timeout: Duration) -> Self {
        Self {
            repo,
            query_timeout,
        }
    }
}

fn map_repository_error(internal: &'static str) -> impl FnOnce(CategoryRepositoryError) -> Error {
    move |error| {
        let tagged = match error {
            CategoryRepositoryError::NotFound { .. } => Error::not_found(CATEGORY_NOT_FOUND),
            CategoryRepositoryError::Connection { .. } | CategoryRepositoryError::Query { .. } => {
                Error::internal(internal)
            }
        };
        tagged.with_op("repositories.categories").with_source(error)
    }
}

#[async_trait]
impl<R> CategoriesQuery for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn list(&self, filter: Filter) -> Result<Vec<Category>, Error> {
        const OP: &str = "services.list_categories";
        let query = normalize_filter(OP, filter, &CATEGORY_SORTABLE_FIELDS)?;
        with_deadline(
            self.query_timeout,
            self.repo.list(&query),
            map_repository_error("Could not query Categories from DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn get(&self, id: i64) -> Result<Category, Error> {
        with_deadline(
            self.query_timeout,
            self.repo.get(id),
            map_repository_error("Could not query Category from DB"),
        )
        .await
        .map_err(|err| Error::wrap("services.get_category", err))
    }
}

#[async_trait]
impl<R> CategoriesCommand for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create(&self, draft: CategoryDraft) -> Result<i64, Error> {
        const OP: &str = "services.create_category";
        draft
            .validate()
            .map_err(|err| Error::invalid(err.to_string()).with_op(OP))?;
        with_deadline(
            self.query_timeout,
            self.repo.create(&draft),
            map_repository_error("Could not insert Category to DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn update(&self, id: i64, draft: CategoryDraft) -> Result<(), Error> {
        const OP: &str = "services.update_category";
        draft
            .validate()
            .map_err(|err| Error::invalid(err.to_string()).with_op(OP))?;
        with_deadline(
            self.query_timeout,
            self.repo.update(id, &draft),
            map_repository_error("Could not update Category in DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        with_deadline(
            self.query_timeout,
            self.repo.delete(id),
            map_repository_error("Could not delete Category from DB"),
        )
        .await
        .map_err(|err| Error::wrap("services.delete_category", err))
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
