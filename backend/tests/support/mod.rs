//! Shared harness for catalog integration tests.
//!
//! Builds the full application stack over fixture repositories, so every
//! middleware runs exactly as in production without a database. The
//! [`embedded_postgres`] module provisions real databases for the Diesel
//! adapter suite.

#![allow(dead_code, reason = "each test crate uses a subset of the harness")]

pub mod embedded_postgres;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::App;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;
use async_trait::async_trait;
use pagination::ListQuery;

use catalog::domain::ports::{
    CategoryRepository, CategoryRepositoryError, FixtureCategoryRepository,
    FixtureProductRepository,
};
use catalog::domain::{Category, CategoryDraft};
use catalog::inbound::http::app::{AppDependencies, build_app};
use catalog::inbound::http::response_cache::ReadThroughCache;
use catalog::inbound::http::state::HttpState;
use catalog::outbound::cache::InMemoryResponseCache;

/// Refresh parameter used by every harness app.
pub const REFRESH_KEY: &str = "opn";

/// Category repository counting how often listings reach storage.
#[derive(Debug, Default)]
pub struct CountingCategoryRepository {
    inner: FixtureCategoryRepository,
    lists: AtomicUsize,
}

impl CountingCategoryRepository {
    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryRepository for CountingCategoryRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Category>, CategoryRepositoryError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(query).await
    }

    async fn get(&self, id: i64) -> Result<Category, CategoryRepositoryError> {
        self.inner.get(id).await
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<i64, CategoryRepositoryError> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<(), CategoryRepositoryError> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<(), CategoryRepositoryError> {
        self.inner.delete(id).await
    }
}

/// Full application over `categories` and the product fixture.
pub fn catalog_app(
    categories: Arc<CountingCategoryRepository>,
    cache_enabled: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repositories(
        categories,
        Arc::new(FixtureProductRepository),
        Duration::from_secs(5),
    );
    build_app(AppDependencies {
        http_state: web::Data::new(state),
        response_cache: ReadThroughCache::new(
            Arc::new(InMemoryResponseCache::new()),
            Duration::from_secs(60),
            REFRESH_KEY,
        ),
        cache_enabled,
        api_prefix: "/api".to_owned(),
    })
}
