//! Product aggregate.
//!
//! A product may reference a category through `category_id`. The reference
//! is weak: services confirm the category exists before writing, but storage
//! does not enforce it and deleting a category leaves the id in place.

use chrono::{DateTime, Utc};
use pagination::SortableFields;
use thiserror::Error;

/// Fields a product listing may be sorted by, defaulting to `id`.
///
/// The names match the serialised field names of a product.
pub const PRODUCT_SORTABLE_FIELDS: SortableFields = SortableFields::new(
    &[
        "id",
        "category_id",
        "title",
        "image_url",
        "price",
        "description",
        "created_at",
        "updated_at",
    ],
    "id",
);

/// Persisted product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    /// Raw integer amount; no currency semantics.
    pub price: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied product content used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

/// Validation failures for [`ProductDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    #[error("Title cannot be empty.")]
    EmptyTitle,
    #[error("Price cannot be empty.")]
    MissingPrice,
}

impl ProductDraft {
    /// Check required fields. Category existence is checked by the service.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.title.as_deref().is_none_or(str::is_empty) {
            return Err(ProductValidationError::EmptyTitle);
        }
        if self.price.is_none() {
            return Err(ProductValidationError::MissingPrice);
        }
        Ok(())
    }
}
