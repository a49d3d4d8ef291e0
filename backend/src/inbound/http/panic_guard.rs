//! Last-resort guard turning a panicking request into an `internal` error.
//!
//! One guarded region wraps the whole request: a panic while building or
//! polling the inner service's future is caught, logged with its payload
//! and answered with an ordinary `500` response carrying the generic
//! internal error body, so outer middleware sees it like any other
//! response. The worker keeps serving other requests.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpRequest, ResponseError};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{Error as DomainError, TraceId};
use crate::inbound::http::error::TracedError;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

fn recovered(request: HttpRequest, payload: Box<dyn Any + Send>) -> ServiceResponse<BoxBody> {
    let trace = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
    error!(
        trace_id = %trace,
        panic = panic_message(payload.as_ref()),
        "request handler panicked"
    );
    let error = TracedError::capture(DomainError::default().with_op("middleware.panic_guard"));
    ServiceResponse::new(request, error.error_response())
}

/// Middleware converting handler panics into `500` responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use catalog::inbound::http::panic_guard::PanicGuard;
///
/// let app = App::new().wrap(PanicGuard);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicGuard;

impl<S, B> Transform<S, ServiceRequest> for PanicGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PanicGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicGuardMiddleware { service }))
    }
}

/// Service wrapper produced by [`PanicGuard`].
pub struct PanicGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PanicGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request = req.request().clone();
        match catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => Box::pin(async move {
                match AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(result) => result.map(ServiceResponse::map_into_left_body),
                    Err(payload) => Ok(recovered(request, payload).map_into_right_body()),
                }
            }),
            Err(payload) => {
                let res = recovered(request, payload).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
