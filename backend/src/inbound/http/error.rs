//! HTTP rendering of domain errors.
//!
//! The body carries the chain's first code and message plus correlation
//! data. The cause chain itself is only logged: 5xx responses at `error`,
//! everything else at `warn`.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Response header carrying the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Transport status for a taxonomy code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::Invalid => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::NotAccepted => StatusCode::NOT_ACCEPTABLE,
    }
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Correlation id, also sent in the `trace-id` header.
    pub trace_id: Option<String>,
    /// RFC 3339 time the response was rendered.
    pub timestamp: String,
    pub message: String,
    pub code: ErrorCode,
    pub http_status_code: u16,
    /// Canonical reason phrase, e.g. `Bad Request`.
    pub http_status: String,
}

impl ErrorResponse {
    fn new(error: &Error, trace_id: Option<TraceId>) -> Self {
        let status = status_for(error.code());
        Self {
            trace_id: trace_id.map(|id| id.to_string()),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message: error.message().to_owned(),
            code: error.code(),
            http_status_code: status.as_u16(),
            http_status: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        }
    }
}

fn render(error: &Error, trace_id: Option<TraceId>) -> HttpResponse {
    let status = status_for(error.code());
    let trace = trace_id.map(|id| id.to_string()).unwrap_or_default();
    if status.is_server_error() {
        error!(trace_id = %trace, code = %error.code(), error = %error, "request failed");
    } else {
        warn!(trace_id = %trace, code = %error.code(), error = %error, "request rejected");
    }

    let mut builder = HttpResponse::build(status);
    if let Some(id) = trace_id {
        builder.insert_header((TRACE_ID_HEADER, id.to_string()));
    }
    builder.json(ErrorResponse::new(error, trace_id))
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        render(self, TraceId::current())
    }
}

/// Error paired with the trace id that was in scope when it was raised.
///
/// Middleware errors are rendered by actix after the request's trace scope
/// has ended, so they capture the id up front.
#[derive(Debug)]
pub struct TracedError {
    error: Error,
    trace_id: Option<TraceId>,
}

impl TracedError {
    /// Capture the current trace id alongside `error`.
    pub fn capture(error: Error) -> Self {
        Self {
            error,
            trace_id: TraceId::current(),
        }
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl ResponseError for TracedError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        render(&self.error, self.trace_id)
    }
}

#[cfg(test)]
mod tests;
