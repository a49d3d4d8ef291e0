//! Product domain service.
//!
//! Writes that name a category confirm it through [`CategoriesQuery`]
//! first. The check and the write are separate calls with no transaction
//! around them, so a category removed in between still receives the write.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::Filter;
use tracing::debug;

use crate::domain::deadline::with_deadline;
use crate::domain::listing::normalize_filter;
use crate::domain::ports::{
    CategoriesQuery, ProductRepository, ProductRepositoryError, ProductsCommand, ProductsQuery,
};
use crate::domain::{Error, PRODUCT_SORTABLE_FIELDS, Product, ProductDraft};

/// Message reported when a product lookup misses.
pub const PRODUCT_NOT_FOUND: &str = "Product not found.";

/// Message reported when a referenced category cannot be confirmed.
pub const INVALID_CATEGORY: &str = "Invalid Category.";

/// Product service implementing the product driving ports.
#[derive(Clone)]
pub struct ProductService<P, C> {
    repo: Arc<P>,
    categories: Arc<C>,
    query_timeout: Duration,
}

impl<P, C> ProductService<P, C> {
    /// Create a service that checks category references through
    /// `categories`.
    pub fn new(repo: Arc<P>, categories: Arc<C>, query_timeout: Duration) -> Self {
        Self {
            repo,
            categories,
            query_timeout,
        }
    }
}

fn map_repository_error(internal: &'static str) -> impl FnOnce(ProductRepositoryError) -> Error {
    move |error| {
        let tagged = match error {
            ProductRepositoryError::NotFound { .. } => Error::not_found(PRODUCT_NOT_FOUND),
            ProductRepositoryError::Connection { .. } | ProductRepositoryError::Query { .. } => {
                Error::internal(internal)
            }
        };
        tagged.with_op("repositories.products").with_source(error)
    }
}

impl<P, C> ProductService<P, C>
where
    P: ProductRepository,
    C: CategoriesQuery,
{
    /// Confirm `category_id` names an existing category.
    ///
    /// Every failure, whatever its code, becomes `invalid`; the lookup error
    /// is kept as the cause for logging.
    async fn ensure_category(&self, op: &'static str, category_id: i64) -> Result<(), Error> {
        match self.categories.get(category_id).await {
            Ok(category) if category.id == category_id => Ok(()),
            Ok(_) => Err(Error::invalid(INVALID_CATEGORY).with_op(op)),
            Err(lookup) => Err(Error::invalid(INVALID_CATEGORY)
                .with_op(op)
                .with_cause(lookup)),
        }
    }

    async fn check_draft(&self, op: &'static str, draft: &ProductDraft) -> Result<(), Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid(err.to_string()).with_op(op))?;
        match draft.category_id {
            Some(category_id) => self.ensure_category(op, category_id).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<P, C> ProductsQuery for ProductService<P, C>
where
    P: ProductRepository,
    C: CategoriesQuery,
{
    async fn list(&self, filter: Filter) -> Result<Vec<Product>, Error> {
        const OP: &str = "services.list_products";
        let query = normalize_filter(OP, filter, &PRODUCT_SORTABLE_FIELDS)?;
        with_deadline(
            self.query_timeout,
            self.repo.list(&query),
            map_repository_error("Could not query Products from DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn get(&self, id: i64) -> Result<Product, Error> {
        with_deadline(
            self.query_timeout,
            self.repo.get(id),
            map_repository_error("Could not query Product from DB"),
        )
        .await
        .map_err(|err| Error::wrap("services.get_product", err))
    }
}

#[async_trait]
impl<P, C> ProductsCommand for ProductService<P, C>
where
    P: ProductRepository,
    C: CategoriesQuery,
{
    async fn create(&self, draft: ProductDraft) -> Result<i64, Error> {
        const OP: &str = "services.create_product";
        self.check_draft(OP, &draft).await?;
        with_deadline(
            self.query_timeout,
            self.repo.create(&draft),
            map_repository_error("Could not insert Product to DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<(), Error> {
        const OP: &str = "services.update_product";
        self.check_draft(OP, &draft).await?;
        with_deadline(
            self.query_timeout,
            self.repo.update(id, &draft),
            map_repository_error("Could not update Product in DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        with_deadline(
            self.query_timeout,
            self.repo.delete(id),
            map_repository_error("Could not delete Product from DB"),
        )
        .await
        .map_err(|err| Error::wrap("services.delete_product", err))
    }

    async fn assign_category(
        &self,
        category_id: i64,
        product_ids: Vec<i64>,
    ) -> Result<(), Error> {
        const OP: &str = "services.assign_products_to_category";
        self.ensure_category(OP, category_id).await?;
        let changed = with_deadline(
            self.query_timeout,
            self.repo.assign_category(category_id, &product_ids),
            map_repository_error("Could not update Products' categories in DB"),
        )
        .await
        .map_err(|err| Error::wrap(OP, err))?;
        debug!(
            category_id,
            requested = product_ids.len(),
            changed,
            "assigned products to category"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
