//! Read-through response cache for `GET` endpoints.
//!
//! The key is the request signature (method, path and sorted query string,
//! minus the refresh parameter). A hit replays the stored status, content
//! type and body. A miss, or any request carrying the refresh parameter,
//! runs the handler and stores the response when its status is 2xx. Writes
//! do not invalidate entries; staleness is bounded by the TTL.
//!
//! Cache backend failures are logged and the request proceeds uncached.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::body::{BoxBody, EitherBody, MessageBody, to_bytes};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use actix_web::http::{Method, StatusCode};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::Error as DomainError;
use crate::domain::ports::{CachedResponse, RequestSignature, ResponseCache, ResponseCacheKey};
use crate::inbound::http::error::TracedError;

/// Response header reporting `HIT` or `MISS`.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Middleware serving repeated `GET` requests from a [`ResponseCache`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use actix_web::App;
/// use catalog::inbound::http::response_cache::ReadThroughCache;
/// use catalog::outbound::cache::InMemoryResponseCache;
///
/// let cache = ReadThroughCache::new(
///     Arc::new(InMemoryResponseCache::new()),
///     Duration::from_secs(60),
///     "opn",
/// );
/// let app = App::new().wrap(cache);
/// ```
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
    refresh_key: Arc<str>,
}

impl ReadThroughCache {
    /// Cache successful `GET` responses for `ttl`; the query parameter
    /// named `refresh_key` forces a refill.
    pub fn new(cache: Arc<dyn ResponseCache>, ttl: Duration, refresh_key: &str) -> Self {
        Self {
            cache,
            ttl,
            refresh_key: Arc::from(refresh_key),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ReadThroughCache
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = ReadThroughCacheMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ReadThroughCacheMiddleware {
            service: Rc::new(service),
            cache: self.cache.clone(),
            ttl: self.ttl,
            refresh_key: self.refresh_key.clone(),
        }))
    }
}

/// Service wrapper produced by [`ReadThroughCache`].
pub struct ReadThroughCacheMiddleware<S> {
    service: Rc<S>,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
    refresh_key: Arc<str>,
}

fn mark(response: &mut HttpResponse<BoxBody>, status: &'static str) {
    response.headers_mut().insert(
        HeaderName::from_static(CACHE_STATUS_HEADER),
        HeaderValue::from_static(status),
    );
}

fn replay(hit: CachedResponse) -> HttpResponse<BoxBody> {
    let status = StatusCode::from_u16(hit.status).unwrap_or(StatusCode::OK);
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = hit.content_type {
        builder.insert_header((CONTENT_TYPE, content_type));
    }
    let mut response = builder.body(hit.body);
    mark(&mut response, "HIT");
    response
}

async fn lookup(cache: &dyn ResponseCache, key: &ResponseCacheKey) -> Option<CachedResponse> {
    match cache.get(key).await {
        Ok(hit) => hit,
        Err(error) => {
            warn!(%error, key = %key, "response cache read failed; serving uncached");
            None
        }
    }
}

impl<S, B> Service<ServiceRequest> for ReadThroughCacheMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() != Method::GET {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let signature = RequestSignature::new(
            req.method().as_str(),
            req.path(),
            req.query_string(),
            &self.refresh_key,
        );
        let key = signature.cache_key();
        let service = self.service.clone();
        let cache = self.cache.clone();
        let ttl = self.ttl;

        Box::pin(async move {
            if signature.refresh_requested() {
                debug!(request = %signature, "response cache refresh requested");
            } else if let Some(hit) = lookup(cache.as_ref(), &key).await {
                debug!(request = %signature, "response cache hit");
                return Ok(req.into_response(replay(hit)).map_into_right_body());
            }

            let res = service.call(req).await?;
            if !res.status().is_success() {
                return Ok(res.map_into_left_body());
            }

            let (http_req, response) = res.into_parts();
            let (response, body) = response.into_parts();
            let bytes = to_bytes(body).await.map_err(|err| {
                let error: Box<dyn std::error::Error> = err.into();
                warn!(request = %signature, %error, "could not buffer response body");
                Error::from(TracedError::capture(
                    DomainError::default().with_op("middleware.response_cache"),
                ))
            })?;

            let stored = CachedResponse {
                status: response.status().as_u16(),
                content_type: response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned),
                body: bytes.to_vec(),
            };
            if let Err(error) = cache.put(&key, &stored, ttl).await {
                warn!(%error, request = %signature, "response cache write failed");
            }

            let mut response = response.set_body(BoxBody::new(bytes));
            mark(&mut response, "MISS");
            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        })
    }
}
