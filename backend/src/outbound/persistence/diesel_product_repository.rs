//! PostgreSQL-backed [`ProductRepository`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::ListQuery;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDraft};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ProductRow, ProductWrite};
use super::ordering::order_by_direction;
use super::pool::DbPool;
use super::schema::products;

/// Diesel adapter for the product port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let boxed = products::table
            .select(ProductRow::as_select())
            .into_boxed();
        let direction = query.direction();
        let ordered = match query.sort_by() {
            "id" => order_by_direction!(boxed, products::id, direction),
            "category_id" => order_by_direction!(boxed, products::category_id, direction),
            "title" => order_by_direction!(boxed, products::title, direction),
            "image_url" => order_by_direction!(boxed, products::image_url, direction),
            "price" => order_by_direction!(boxed, products::price, direction),
            "description" => order_by_direction!(boxed, products::description, direction),
            "created_at" => order_by_direction!(boxed, products::created_at, direction),
            "updated_at" => order_by_direction!(boxed, products::updated_at, direction),
            other => {
                return Err(ProductRepositoryError::query(format!(
                    "unsupported sort field: {other}"
                )));
            }
        };
        let rows = ordered
            .offset(query.offset())
            .limit(query.limit())
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Product::from)
            .ok_or_else(|| ProductRepositoryError::not_found(id))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<i64, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(products::table)
            .values(ProductWrite::from(draft))
            .returning(products::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changed = diesel::update(products::table.find(id))
            .set((
                ProductWrite::from(draft),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if changed == 0 {
            return Err(ProductRepositoryError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn assign_category(
        &self,
        category_id: i64,
        product_ids: &[i64],
    ) -> Result<u64, ProductRepositoryError> {
        if product_ids.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changed = diesel::update(products::table.filter(products::id.eq_any(product_ids)))
            .set((
                products::category_id.eq(Some(category_id)),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(changed).unwrap_or(u64::MAX))
    }
}
