//! JSON payloads for the catalog endpoints.
//!
//! Field names are snake_case and match the sortable field allow-lists, so
//! a client can sort by any field it sees in a response. Conversions to and
//! from domain types are lossless in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Category, CategoryDraft, Product, ProductDraft};

/// Body for `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

impl From<CategoryRequest> for CategoryDraft {
    fn from(value: CategoryRequest) -> Self {
        Self {
            title: value.title,
            image_url: value.image_url,
            sort: value.sort,
        }
    }
}

impl From<CategoryDraft> for CategoryRequest {
    fn from(value: CategoryDraft) -> Self {
        Self {
            title: value.title,
            image_url: value.image_url,
            sort: value.sort,
        }
    }
}

/// Category as returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub sort: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            title: value.title,
            image_url: value.image_url,
            sort: value.sort,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<CategoryResponse> for Category {
    fn from(value: CategoryResponse) -> Self {
        Self {
            id: value.id,
            title: value.title,
            image_url: value.image_url,
            sort: value.sort,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(value: ProductRequest) -> Self {
        Self {
            category_id: value.category_id,
            title: value.title,
            image_url: value.image_url,
            price: value.price,
            description: value.description,
        }
    }
}

impl From<ProductDraft> for ProductRequest {
    fn from(value: ProductDraft) -> Self {
        Self {
            category_id: value.category_id,
            title: value.title,
            image_url: value.image_url,
            price: value.price,
            description: value.description,
        }
    }
}

/// Product as returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            title: value.title,
            image_url: value.image_url,
            price: value.price,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ProductResponse> for Product {
    fn from(value: ProductResponse) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            title: value.title,
            image_url: value.image_url,
            price: value.price,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body returned by the create endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body for `PUT /products/category/{category_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignCategoryRequest {
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CATEGORY_SORTABLE_FIELDS, PRODUCT_SORTABLE_FIELDS};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    #[fixture]
    fn category() -> CategoryResponse {
        CategoryResponse {
            id: 201,
            title: Some("Monitors".to_owned()),
            image_url: Some("https://category201.image".to_owned()),
            sort: Some(3),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap(),
        }
    }

    #[fixture]
    fn product() -> ProductResponse {
        ProductResponse {
            id: 201,
            category_id: Some(7),
            title: Some("Flash Drive 1TB".to_owned()),
            image_url: None,
            price: Some(1050),
            description: Some("USB 3.2".to_owned()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn keys(value: &impl Serialize) -> Vec<String> {
        match serde_json::to_value(value).expect("serialises") {
            Value::Object(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                keys
            }
            other => panic!("expected object, got {other}"),
        }
    }

    fn sorted(fields: &[&str]) -> Vec<String> {
        let mut fields: Vec<String> = fields.iter().map(|f| (*f).to_owned()).collect();
        fields.sort();
        fields
    }

    #[rstest]
    fn category_response_survives_domain_round_trip(category: CategoryResponse) {
        let back = CategoryResponse::from(Category::from(category.clone()));
        assert_eq!(back, category);
    }

    #[rstest]
    fn product_response_survives_domain_round_trip(product: ProductResponse) {
        let back = ProductResponse::from(Product::from(product.clone()));
        assert_eq!(back, product);
    }

    #[rstest]
    fn requests_survive_draft_round_trip() {
        let category = CategoryRequest {
            title: Some("Laptops".to_owned()),
            image_url: None,
            sort: Some(1),
        };
        assert_eq!(CategoryRequest::from(CategoryDraft::from(category.clone())), category);

        let product = ProductRequest {
            category_id: Some(201),
            title: Some("X".to_owned()),
            image_url: Some("https://x".to_owned()),
            price: Some(100),
            description: None,
        };
        assert_eq!(ProductRequest::from(ProductDraft::from(product.clone())), product);
    }

    #[rstest]
    fn response_keys_match_sortable_fields(category: CategoryResponse, product: ProductResponse) {
        assert_eq!(keys(&category), sorted(CATEGORY_SORTABLE_FIELDS.fields()));
        assert_eq!(keys(&product), sorted(PRODUCT_SORTABLE_FIELDS.fields()));
    }

    #[rstest]
    fn missing_request_fields_decode_as_none() {
        let request: ProductRequest =
            serde_json::from_str(r#"{"title":"X"}"#).expect("decodes");
        assert_eq!(request.price, None);
        assert_eq!(request.category_id, None);
    }
}
