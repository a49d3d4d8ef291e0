//! Diesel row types. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Category, CategoryDraft, Product, ProductDraft};

use super::schema::{categories, products};

/// Row read from `categories`; field order follows the table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub sort: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            sort: row.sort,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert and full-replace payload for `categories`.
///
/// `None` fields are written as `NULL` so updates replace every column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CategoryWrite<'a> {
    pub title: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub sort: Option<i64>,
}

impl<'a> From<&'a CategoryDraft> for CategoryWrite<'a> {
    fn from(draft: &'a CategoryDraft) -> Self {
        Self {
            title: draft.title.as_deref(),
            image_url: draft.image_url.as_deref(),
            sort: draft.sort,
        }
    }
}

/// Row read from `products`; field order follows the table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            title: row.title,
            image_url: row.image_url,
            price: row.price,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert and full-replace payload for `products`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductWrite<'a> {
    pub category_id: Option<i64>,
    pub title: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub price: Option<i64>,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a ProductDraft> for ProductWrite<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            category_id: draft.category_id,
            title: draft.title.as_deref(),
            image_url: draft.image_url.as_deref(),
            price: draft.price,
            description: draft.description.as_deref(),
        }
    }
}
