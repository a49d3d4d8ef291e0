//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ResponseCache`]) are implemented by
//! outbound adapters and return port-specific error enums. Driving ports
//! (`*Query`, `*Command`) are implemented by domain services and return the
//! domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod categories_command;
mod categories_query;
mod category_repository;
mod product_repository;
mod products_command;
mod products_query;
mod response_cache;

#[cfg(test)]
pub use categories_command::MockCategoriesCommand;
pub use categories_command::CategoriesCommand;
#[cfg(test)]
pub use categories_query::MockCategoriesQuery;
pub use categories_query::CategoriesQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, FIXTURE_CATEGORY_ID, FixtureCategoryRepository,
};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    FIXTURE_PRODUCT_ID, FixtureProductRepository, ProductRepository, ProductRepositoryError,
};
#[cfg(test)]
pub use products_command::MockProductsCommand;
pub use products_command::ProductsCommand;
#[cfg(test)]
pub use products_query::MockProductsQuery;
pub use products_query::ProductsQuery;
#[cfg(test)]
pub use response_cache::MockResponseCache;
pub use response_cache::{
    CachedResponse, RequestSignature, ResponseCache, ResponseCacheError, ResponseCacheKey,
};
