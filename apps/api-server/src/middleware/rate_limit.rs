//! Rate limiting middleware.

use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use postboard_shared::ErrorResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use postboard_core::ports::RateLimiter;

use crate::observability::RequestId;

/// Rate limiting middleware factory.
///
/// Keys requests by the socket's peer IP. Forwarding headers are ignored
/// since any client can set them. Without a limiter every request passes.
pub struct RateLimitMiddleware {
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Option<Arc<dyn RateLimiter>>,
}

/// Client identifier: the peer IP without its port.
fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Whole seconds a client has to wait, rounded up.
fn retry_after_secs(wait: Duration) -> u64 {
    wait.as_secs() + u64::from(wait.subsec_nanos() > 0)
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let Some(limiter) = self.limiter.clone() else {
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        };

        let key = client_key(&req);
        let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());

        Box::pin(async move {
            match limiter.check(&key).await {
                Ok(result) if !result.allowed => {
                    let retry_after = retry_after_secs(result.reset_after);
                    tracing::warn!(client = %key, retry_after, "Rate limit exceeded");

                    let mut body = ErrorResponse::rate_limited(retry_after);
                    if let Some(request_id) = request_id {
                        body = body.with_request_id(request_id);
                    }

                    let response = HttpResponse::TooManyRequests()
                        .insert_header(("X-RateLimit-Limit", limiter.limit().to_string()))
                        .insert_header(("Retry-After", retry_after.to_string()))
                        .json(body);

                    let (http_req, _payload) = req.into_parts();
                    return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
                }
                Ok(_) => {}
                Err(e) => {
                    // Fail open
                    tracing::error!(error = %e, "Rate limiter error, failing open");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, web};
    use async_trait::async_trait;
    use postboard_core::ports::{RateLimitError, RateLimitResult};
    use std::collections::HashSet;
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::observability::RequestIdMiddleware;

    /// Allows the first `budget` requests, then blocks for 2.5 seconds.
    struct CountingLimiter {
        budget: u32,
        seen: AtomicU32,
    }

    #[async_trait]
    impl RateLimiter for CountingLimiter {
        async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            let seen = self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(RateLimitResult {
                allowed: seen < self.budget,
                reset_after: Duration::from_millis(2500),
            })
        }

        fn limit(&self) -> u32 {
            self.budget
        }
    }

    /// One request per key.
    #[derive(Default)]
    struct OncePerKey {
        seen: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl RateLimiter for OncePerKey {
        async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
            Ok(RateLimitResult {
                allowed: self.seen.lock().unwrap().insert(key.to_string()),
                reset_after: Duration::from_secs(60),
            })
        }

        fn limit(&self) -> u32 {
            1
        }
    }

    struct BrokenLimiter;

    #[async_trait]
    impl RateLimiter for BrokenLimiter {
        async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            Err(RateLimitError::Backend("down".to_string()))
        }

        fn limit(&self) -> u32 {
            0
        }
    }

    fn peer(addr: &str) -> SocketAddr {
        addr.parse().unwrap()
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_secs(3)), 3);
        assert_eq!(retry_after_secs(Duration::from_millis(2001)), 3);
        assert_eq!(retry_after_secs(Duration::ZERO), 0);
    }

    #[actix_web::test]
    async fn test_blocks_with_429_after_budget() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(CountingLimiter {
            budget: 2,
            seen: AtomicU32::new(0),
        });
        let app = init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(limiter)))
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(|| async { "ok" })),
        )
        .await;

        for _ in 0..2 {
            let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let req = TestRequest::get()
            .uri("/")
            .insert_header(("X-Request-ID", "burst-3"))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers().get("Retry-After").unwrap(), "3");
        assert_eq!(res.headers().get("X-RateLimit-Limit").unwrap(), "2");

        let body: ErrorResponse = read_body_json(res).await;
        assert!(body.error.starts_with("Rate limit exceeded"));
        assert_eq!(body.request_id.as_deref(), Some("burst-3"));
    }

    #[actix_web::test]
    async fn test_forwarded_headers_do_not_change_the_client() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(OncePerKey::default());
        let app = init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(limiter)))
                .route("/", web::get().to(|| async { "ok" })),
        )
        .await;

        let mut allowed = 0;
        for n in 0..5 {
            let req = TestRequest::get()
                .uri("/")
                .peer_addr(peer(&format!("10.0.0.9:{}", 40000 + n)))
                .insert_header(("X-Forwarded-For", format!("192.0.2.{n}")))
                .insert_header(("Forwarded", format!("for=198.51.100.{n}")))
                .to_request();
            if call_service(&app, req).await.status() == StatusCode::OK {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 1);

        let req = TestRequest::get()
            .uri("/")
            .peer_addr(peer("10.0.0.10:40000"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_fails_open_on_limiter_error() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(BrokenLimiter);
        let app = init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(limiter)))
                .route("/", web::get().to(|| async { "ok" })),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_passes_through_without_limiter() {
        let app = init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(None))
                .route("/", web::get().to(|| async { "ok" })),
        )
        .await;

        for _ in 0..5 {
            let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }
}
