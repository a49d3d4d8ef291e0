//! Driving port for product reads.

use async_trait::async_trait;
use pagination::Filter;

use crate::domain::{Error, Product};

/// Product read use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsQuery: Send + Sync {
    /// List products after validating `filter` against the product
    /// allow-list.
    async fn list(&self, filter: Filter) -> Result<Vec<Product>, Error>;

    /// Fetch one product, failing `not_found` when absent.
    async fn get(&self, id: i64) -> Result<Product, Error>;
}
