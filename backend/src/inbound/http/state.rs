//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only depend on the
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CategoryRepository, ProductRepository, ProductsCommand,
    ProductsQuery,
};
use crate::domain::{CategoryService, ProductService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoriesQuery>,
    pub categories_command: Arc<dyn CategoriesCommand>,
    pub products: Arc<dyn ProductsQuery>,
    pub products_command: Arc<dyn ProductsCommand>,
}

impl HttpState {
    /// Bundle already-built driving ports.
    pub fn new(
        categories: Arc<dyn CategoriesQuery>,
        categories_command: Arc<dyn CategoriesCommand>,
        products: Arc<dyn ProductsQuery>,
        products_command: Arc<dyn ProductsCommand>,
    ) -> Self {
        Self {
            categories,
            categories_command,
            products,
            products_command,
        }
    }

    /// Build the category and product services over the given repositories.
    ///
    /// The product service checks category references through the category
    /// service, so those lookups run under the same deadline.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use catalog::domain::ports::{FixtureCategoryRepository, FixtureProductRepository};
    /// use catalog::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::from_repositories(
    ///     Arc::new(FixtureCategoryRepository),
    ///     Arc::new(FixtureProductRepository),
    ///     Duration::from_secs(5),
    /// );
    /// let _products = state.products.clone();
    /// ```
    pub fn from_repositories<C, P>(
        categories: Arc<C>,
        products: Arc<P>,
        query_timeout: Duration,
    ) -> Self
    where
        C: CategoryRepository + 'static,
        P: ProductRepository + 'static,
    {
        let category_service = Arc::new(CategoryService::new(categories, query_timeout));
        let product_service = Arc::new(ProductService::new(
            products,
            category_service.clone(),
            query_timeout,
        ));
        Self::new(
            category_service.clone(),
            category_service,
            product_service.clone(),
            product_service,
        )
    }
}
