//! PostgreSQL persistence adapters.
//!
//! Repository implementations translate between Diesel rows and domain
//! types and nothing else. Row structs and the schema stay private to this
//! module; failures leave as port error enums.

mod diesel_category_repository;
mod diesel_product_repository;
mod error_mapping;
mod migrations;
mod models;
mod ordering;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
