//! HTTP inbound adapter exposing the catalog REST endpoints.

pub mod accept;
pub mod app;
pub mod categories;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod home;
pub mod panic_guard;
pub mod products;
pub mod response_cache;
pub mod state;

pub use error::ApiResult;
