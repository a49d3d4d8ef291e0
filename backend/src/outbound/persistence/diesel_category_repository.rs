//! PostgreSQL-backed [`CategoryRepository`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::ListQuery;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryDraft};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, CategoryWrite};
use super::ordering::order_by_direction;
use super::pool::DbPool;
use super::schema::categories;

/// Diesel adapter for the category port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let boxed = categories::table
            .select(CategoryRow::as_select())
            .into_boxed();
        let direction = query.direction();
        let ordered = match query.sort_by() {
            "id" => order_by_direction!(boxed, categories::id, direction),
            "title" => order_by_direction!(boxed, categories::title, direction),
            "image_url" => order_by_direction!(boxed, categories::image_url, direction),
            "sort" => order_by_direction!(boxed, categories::sort, direction),
            "created_at" => order_by_direction!(boxed, categories::created_at, direction),
            "updated_at" => order_by_direction!(boxed, categories::updated_at, direction),
            other => {
                return Err(CategoryRepositoryError::query(format!(
                    "unsupported sort field: {other}"
                )));
            }
        };
        let rows = ordered
            .offset(query.offset())
            .limit(query.limit())
            .load::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Category::from)
            .ok_or_else(|| CategoryRepositoryError::not_found(id))
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<i64, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(categories::table)
            .values(CategoryWrite::from(draft))
            .returning(categories::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changed = diesel::update(categories::table.find(id))
            .set((
                CategoryWrite::from(draft),
                categories::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if changed == 0 {
            return Err(CategoryRepositoryError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
