//! Content negotiation guard.
//!
//! Every endpoint answers in JSON. Requests whose `Accept` header rules that
//! out are rejected with `not_accepted` before reaching a handler. A missing
//! header means the client accepts anything.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::ACCEPT;
use futures_util::future::{Either, LocalBoxFuture, Ready, ready};

use crate::domain::Error as DomainError;
use crate::inbound::http::error::TracedError;

const JSON: &str = "application/json";
const ANY: &str = "*/*";

/// Whether an `Accept` header value admits a JSON response.
///
/// Matching is a case-insensitive substring check for `application/json`
/// or `*/*`.
pub fn accepts_json(header: &str) -> bool {
    let header = header.to_ascii_lowercase();
    header.contains(JSON) || header.contains(ANY)
}

fn rejection(header: &str) -> DomainError {
    DomainError::not_accepted(format!(
        "Header accept: '{header}' is not accepted. {JSON} or {ANY} should be accepted."
    ))
    .with_op("middleware.accept_json")
}

/// Middleware rejecting requests that cannot take a JSON response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use catalog::inbound::http::accept::AcceptJson;
///
/// let app = App::new().wrap(AcceptJson);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptJson;

impl<S, B> Transform<S, ServiceRequest> for AcceptJson
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AcceptJsonMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AcceptJsonMiddleware { service }))
    }
}

/// Service wrapper produced by [`AcceptJson`].
pub struct AcceptJsonMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AcceptJsonMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Either<
        LocalBoxFuture<'static, Result<Self::Response, Self::Error>>,
        Ready<Result<Self::Response, Self::Error>>,
    >;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let rejected = req
            .headers()
            .get(ACCEPT)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .filter(|value| !accepts_json(value));

        match rejected {
            Some(header) => {
                let err = TracedError::capture(rejection(&header));
                let res = req.error_response(err).map_into_right_body();
                Either::Right(ready(Ok(res)))
            }
            None => {
                let fut = self.service.call(req);
                Either::Left(Box::pin(async move {
                    fut.await.map(ServiceResponse::map_into_left_body)
                }))
            }
        }
    }
}
