//! Category aggregate.
//!
//! Categories group products. The store assigns `id` and both timestamps;
//! clients only ever supply a [`CategoryDraft`], which fully replaces the
//! mutable fields on update.

use chrono::{DateTime, Utc};
use pagination::SortableFields;
use thiserror::Error;

/// Fields a category listing may be sorted by, defaulting to `sort`.
///
/// The names match the serialised field names of a category.
pub const CATEGORY_SORTABLE_FIELDS: SortableFields = SortableFields::new(
    &["id", "title", "image_url", "sort", "created_at", "updated_at"],
    "sort",
);

/// Persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub title: Option<String>,
    pub image_url: Option<String>,
    /// Default ordering key for listings.
    pub sort: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied category content used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub sort: Option<i64>,
}

/// Validation failures for [`CategoryDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    #[error("Title cannot be empty.")]
    EmptyTitle,
}

impl CategoryDraft {
    /// Check the draft before it reaches storage.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{CategoryDraft, CategoryValidationError};
    ///
    /// let draft = CategoryDraft { title: Some(String::new()), ..CategoryDraft::default() };
    /// assert_eq!(draft.validate(), Err(CategoryValidationError::EmptyTitle));
    /// ```
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => Ok(()),
            _ => Err(CategoryValidationError::EmptyTitle),
        }
    }
}
