//! Per-client request budgets.
//!
//! Each limiter admits at most `max_requests` per window for every peer IP:
//! half the budget (rounded up) as an immediate burst, the other half
//! refilled evenly across the window. API routes and page routes get
//! separate limiters.

use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use tracing::warn;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later";

/// How a rejected request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Json,
    Text,
}

impl Rejection {
    fn response(self) -> HttpResponse {
        match self {
            Self::Json => HttpResponse::TooManyRequests().json(json!({ "error": RATE_LIMIT_MESSAGE })),
            Self::Text => HttpResponse::TooManyRequests()
                .content_type("text/plain; charset=utf-8")
                .body(format!("{RATE_LIMIT_MESSAGE}.")),
        }
    }
}

#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    rejection: Rejection,
}

/// Quota whose burst plus in-window refill never exceeds `max_requests`.
/// A budget of one regains its slot only after a full window.
pub fn window_quota(max_requests: u32, window: Duration) -> Option<Quota> {
    let burst = NonZeroU32::new(max_requests - max_requests / 2)?;
    let refill = (max_requests / 2).max(1);
    Some(Quota::with_period(window / refill)?.allow_burst(burst))
}

impl RateLimit {
    /// Returns `None` when the budget or the window is zero.
    pub fn per_window(max_requests: u32, window: Duration, rejection: Rejection) -> Option<Self> {
        let quota = window_quota(max_requests, window)?;
        Some(Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            rejection,
        })
    }

    /// Drops clients whose budget has fully recovered.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: Arc::clone(&self.limiter),
            rejection: self.rejection,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    rejection: Rejection,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .peer_addr()
            .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |addr| addr.ip());

        if self.limiter.check_key(&client).is_err() {
            warn!(%client, path = req.path(), "rate limit exceeded");
            let response = req.into_response(self.rejection.response());
            return Box::pin(ready(Ok(response.map_into_right_body())));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, read_body, read_body_json, TestRequest};
    use actix_web::{http::StatusCode, web, App};
    use governor::clock::FakeRelativeClock;
    use serde_json::Value;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn from(ip: &str) -> TestRequest {
        TestRequest::get()
            .uri("/")
            .peer_addr(format!("{ip}:40000").parse().unwrap())
    }

    #[actix_web::test]
    async fn rejects_requests_over_budget() {
        let limit = RateLimit::per_window(4, Duration::from_secs(900), Rejection::Json).unwrap();
        let app = init_service(App::new().wrap(limit).route("/", web::get().to(ok))).await;

        // half of the budget is available at once
        for _ in 0..2 {
            let resp = call_service(&app, from("10.0.0.1").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
        let resp = call_service(&app, from("10.0.0.1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["error"], RATE_LIMIT_MESSAGE);
    }

    #[actix_web::test]
    async fn budgets_are_per_client() {
        let limit = RateLimit::per_window(1, Duration::from_secs(900), Rejection::Text).unwrap();
        let app = init_service(App::new().wrap(limit).route("/", web::get().to(ok))).await;

        let resp = call_service(&app, from("10.0.0.1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = call_service(&app, from("10.0.0.2").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = call_service(&app, from("10.0.0.1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = read_body(resp).await;
        assert_eq!(body, "Too many requests, please try again later.");
    }

    #[test]
    fn zero_budget_or_window_is_refused() {
        assert!(RateLimit::per_window(0, Duration::from_secs(900), Rejection::Json).is_none());
        assert!(RateLimit::per_window(10, Duration::ZERO, Rejection::Json).is_none());
    }

    #[test]
    fn budget_holds_across_every_window() {
        let window = Duration::from_secs(2);
        let clock = FakeRelativeClock::default();
        let limiter = RateLimiter::direct_with_clock(window_quota(4, window).unwrap(), clock.clone());

        let step = Duration::from_millis(50);
        let mut accepted = Vec::new();
        for tick in 0..200u32 {
            if limiter.check().is_ok() {
                accepted.push(step * tick);
            }
            clock.advance(step);
        }

        for start in &accepted {
            let in_window = accepted
                .iter()
                .filter(|t| **t >= *start && **t < *start + window)
                .count();
            assert!(in_window <= 4, "{in_window} requests admitted in one window");
        }
        assert!(accepted.len() >= 10, "only {} requests admitted over 10s", accepted.len());
    }

    #[test]
    fn single_request_budget_waits_a_full_window() {
        let window = Duration::from_secs(900);
        let clock = FakeRelativeClock::default();
        let limiter = RateLimiter::direct_with_clock(window_quota(1, window).unwrap(), clock.clone());

        assert!(limiter.check().is_ok());
        clock.advance(window - Duration::from_secs(1));
        assert!(limiter.check().is_err());
        clock.advance(Duration::from_secs(1));
        assert!(limiter.check().is_ok());
    }

    #[actix_web::test]
    async fn recovered_clients_are_pruned() {
        let limit = RateLimit::per_window(2, Duration::from_millis(20), Rejection::Json).unwrap();
        let app = init_service(App::new().wrap(limit.clone()).route("/", web::get().to(ok))).await;

        call_service(&app, from("10.0.0.1").to_request()).await;
        call_service(&app, from("10.0.0.2").to_request()).await;
        assert_eq!(limit.tracked_clients(), 2);

        tokio::time::sleep(Duration::from_millis(100)).await;
        limit.retain_recent();
        assert_eq!(limit.tracked_clients(), 0);
    }
}
