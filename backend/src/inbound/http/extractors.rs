//! Extractor configuration mapping decode failures onto `invalid`.
//!
//! actix's default extractor errors render as plain text; these handlers
//! route them through the domain error so clients get the usual JSON body.

use actix_web::web;
use thiserror::Error;

use crate::domain::Error;
use crate::inbound::http::error::TracedError;

/// Message for bodies that fail to decode.
pub const INVALID_BODY_MESSAGE: &str = "Data validation error.";
/// Message for path segments that fail to decode.
pub const INVALID_PATH_MESSAGE: &str = "Invalid path parameter.";
/// Message for query strings that fail to decode.
pub const INVALID_QUERY_MESSAGE: &str = "Invalid query parameters.";

/// Extractor failure text, kept as the terminal cause.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Rejection(String);

fn rejected(op: &'static str, message: &'static str, detail: String) -> actix_web::Error {
    TracedError::capture(
        Error::invalid(message)
            .with_op(op)
            .with_source(Rejection(detail)),
    )
    .into()
}

/// JSON body extractor settings.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        rejected("extractors.json", INVALID_BODY_MESSAGE, err.to_string())
    })
}

/// Path extractor settings.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        rejected("extractors.path", INVALID_PATH_MESSAGE, err.to_string())
    })
}

/// Query extractor settings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        rejected("extractors.query", INVALID_QUERY_MESSAGE, err.to_string())
    })
}
