//! Port for product persistence.

use async_trait::async_trait;
use pagination::ListQuery;

use crate::domain::{Product, ProductDraft};

use super::category_repository::{FIXTURE_CATEGORY_ID, fixture_timestamp};
use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// No row matches the requested id.
        NotFound { id: i64 } => "product {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
    }
}

/// Product storage.
///
/// `category_id` is stored as given; the repository never checks that the
/// category exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Return one page of products ordered as `query` requests.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Fetch a product by id.
    async fn get(&self, id: i64) -> Result<Product, ProductRepositoryError>;

    /// Insert a product and return the store-assigned id.
    async fn create(&self, draft: &ProductDraft) -> Result<i64, ProductRepositoryError>;

    /// Replace the mutable fields of an existing product.
    ///
    /// Missing rows yield [`ProductRepositoryError::NotFound`].
    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<(), ProductRepositoryError>;

    /// Remove a product. Deleting an absent row succeeds.
    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError>;

    /// Point every listed product at `category_id`.
    ///
    /// Returns the number of rows changed. Ids with no row are skipped and
    /// an empty slice changes nothing.
    async fn assign_category(
        &self,
        category_id: i64,
        product_ids: &[i64],
    ) -> Result<u64, ProductRepositoryError>;
}

/// Id of the one product the fixture repository can fetch or update.
pub const FIXTURE_PRODUCT_ID: i64 = 201;

/// In-memory stand-in serving a fixed data set.
///
/// `get`, `update` and `assign_category` only know [`FIXTURE_PRODUCT_ID`]
/// ("Flash Drive 1TB" in category 201); `create` always assigns
/// [`FIXTURE_PRODUCT_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductRepository;

impl FixtureProductRepository {
    fn flash_drive() -> Product {
        Product {
            id: FIXTURE_PRODUCT_ID,
            category_id: Some(FIXTURE_CATEGORY_ID),
            title: Some("Flash Drive 1TB".to_owned()),
            image_url: Some("https://product201.image".to_owned()),
            price: Some(1050),
            description: Some("USB 3.2 flash drive".to_owned()),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }
}

#[async_trait]
impl ProductRepository for FixtureProductRepository {
    async fn list(&self, _query: &ListQuery) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(vec![Self::flash_drive()])
    }

    async fn get(&self, id: i64) -> Result<Product, ProductRepositoryError> {
        if id == FIXTURE_PRODUCT_ID {
            Ok(Self::flash_drive())
        } else {
            Err(ProductRepositoryError::not_found(id))
        }
    }

    async fn create(&self, _draft: &ProductDraft) -> Result<i64, ProductRepositoryError> {
        Ok(FIXTURE_PRODUCT_ID)
    }

    async fn update(&self, id: i64, _draft: &ProductDraft) -> Result<(), ProductRepositoryError> {
        if id == FIXTURE_PRODUCT_ID {
            Ok(())
        } else {
            Err(ProductRepositoryError::not_found(id))
        }
    }

    async fn delete(&self, _id: i64) -> Result<(), ProductRepositoryError> {
        Ok(())
    }

    async fn assign_category(
        &self,
        _category_id: i64,
        product_ids: &[i64],
    ) -> Result<u64, ProductRepositoryError> {
        let changed = product_ids
            .iter()
            .filter(|id| **id == FIXTURE_PRODUCT_ID)
            .count();
        Ok(u64::try_from(changed).unwrap_or(u64::MAX))
    }
}
