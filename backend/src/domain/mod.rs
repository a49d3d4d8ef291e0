//! Domain models, services and ports.
//!
//! Public surface:
//! - [`Category`] / [`Product`] with their client-supplied drafts and
//!   sortable field allow-lists.
//! - [`Error`] / [`ErrorCode`]: the layered error taxonomy.
//! - [`CategoryService`] / [`ProductService`]: driving port implementations.
//! - [`TraceId`]: request correlation id.

mod category;
pub mod category_service;
mod deadline;
pub mod error;
mod listing;
pub mod ports;
mod product;
pub mod product_service;
mod trace_id;

pub use self::category::{
    CATEGORY_SORTABLE_FIELDS, Category, CategoryDraft, CategoryValidationError,
};
pub use self::category_service::CategoryService;
pub use self::deadline::TIMEOUT_MESSAGE;
pub use self::error::{Cause, Error, ErrorCode, GENERIC_ERROR_MESSAGE};
pub use self::product::{PRODUCT_SORTABLE_FIELDS, Product, ProductDraft, ProductValidationError};
pub use self::product_service::ProductService;
pub use self::trace_id::TraceId;
