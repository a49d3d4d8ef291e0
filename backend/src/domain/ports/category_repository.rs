//! Port for category persistence.
//!
//! Adapters receive listing requests only as a validated
//! [`ListQuery`], so they may translate its sort field and direction into
//! an `ORDER BY` clause directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::ListQuery;

use crate::domain::{Category, CategoryDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// No row matches the requested id.
        NotFound { id: i64 } => "category {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

/// Category storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Return one page of categories ordered as `query` requests.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch a category by id.
    ///
    /// Missing rows yield [`CategoryRepositoryError::NotFound`].
    async fn get(&self, id: i64) -> Result<Category, CategoryRepositoryError>;

    /// Insert a category and return the store-assigned id.
    async fn create(&self, draft: &CategoryDraft) -> Result<i64, CategoryRepositoryError>;

    /// Replace the mutable fields of an existing category.
    ///
    /// Missing rows yield [`CategoryRepositoryError::NotFound`].
    async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<(), CategoryRepositoryError>;

    /// Remove a category. Deleting an absent row succeeds.
    async fn delete(&self, id: i64) -> Result<(), CategoryRepositoryError>;
}

/// Id of the one category the fixture repository can fetch or update.
pub const FIXTURE_CATEGORY_ID: i64 = 201;

/// Timestamp stamped on every fixture row (2024-01-01T00:00:00Z).
pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

/// In-memory stand-in serving a fixed data set.
///
/// `get` and `update` only know [`FIXTURE_CATEGORY_ID`] ("Monitors");
/// `list` returns a single "Laptops" row; `create` always assigns
/// [`FIXTURE_CATEGORY_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryRepository;

impl FixtureCategoryRepository {
    fn category(id: i64, title: &str, image_url: &str, sort: i64) -> Category {
        Category {
            id,
            title: Some(title.to_owned()),
            image_url: Some(image_url.to_owned()),
            sort: Some(sort),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }
}

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn list(&self, _query: &ListQuery) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(vec![Self::category(
            200,
            "Laptops",
            "https://category200.image",
            1,
        )])
    }

    async fn get(&self, id: i64) -> Result<Category, CategoryRepositoryError> {
        if id == FIXTURE_CATEGORY_ID {
            Ok(Self::category(id, "Monitors", "https://category201.image", 3))
        } else {
            Err(CategoryRepositoryError::not_found(id))
        }
    }

    async fn create(&self, _draft: &CategoryDraft) -> Result<i64, CategoryRepositoryError> {
        Ok(FIXTURE_CATEGORY_ID)
    }

    async fn update(&self, id: i64, _draft: &CategoryDraft) -> Result<(), CategoryRepositoryError> {
        if id == FIXTURE_CATEGORY_ID {
            Ok(())
        } else {
            Err(CategoryRepositoryError::not_found(id))
        }
    }

    async fn delete(&self, _id: i64) -> Result<(), CategoryRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CATEGORY_SORTABLE_FIELDS;
    use pagination::Filter;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_serves_monitors() {
        let category = FixtureCategoryRepository
            .get(FIXTURE_CATEGORY_ID)
            .await
            .expect("fixture category");
        assert_eq!(category.title.as_deref(), Some("Monitors"));
        assert_eq!(category.sort, Some(3));
    }

    #[tokio::test]
    async fn fixture_reports_unknown_ids_missing() {
        let err = FixtureCategoryRepository
            .get(404)
            .await
            .expect_err("unknown id");
        assert_eq!(err, CategoryRepositoryError::NotFound { id: 404 });
    }

    #[tokio::test]
    async fn fixture_lists_one_row() {
        let query = Filter::default()
            .normalize(&CATEGORY_SORTABLE_FIELDS)
            .expect("default filter");
        let rows = FixtureCategoryRepository
            .list(&query)
            .await
            .expect("fixture list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 200);
    }

    #[rstest]
    fn errors_render_context() {
        assert_eq!(
            CategoryRepositoryError::not_found(7_i64).to_string(),
            "category 7 not found"
        );
        assert_eq!(
            CategoryRepositoryError::query("syntax error").to_string(),
            "category repository query failed: syntax error"
        );
    }
}
