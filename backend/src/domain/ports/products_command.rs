//! Driving port for product mutations.
//!
//! Every write that names a category first confirms the category exists;
//! a failed check surfaces as `invalid` ("Invalid Category.") before any
//! storage mutation is attempted.

use async_trait::async_trait;

use crate::domain::{Error, ProductDraft};

/// Product write use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsCommand: Send + Sync {
    /// Validate and insert a product, returning its id.
    async fn create(&self, draft: ProductDraft) -> Result<i64, Error>;

    /// Validate and replace a product's content.
    async fn update(&self, id: i64, draft: ProductDraft) -> Result<(), Error>;

    /// Delete a product; absent rows are not an error.
    async fn delete(&self, id: i64) -> Result<(), Error>;

    /// Move the listed products into `category_id`.
    ///
    /// An empty id list is forwarded to storage unchanged.
    async fn assign_category(&self, category_id: i64, product_ids: Vec<i64>)
    -> Result<(), Error>;
}
