//! Shared fixtures for handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use chrono::{NaiveDate, NaiveDateTime};

use crate::db;
use crate::handlers;
use crate::shop::{FixedClock, ShopRules};
use crate::state::AppState;

pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}

/// 2026-10-17 is a Saturday.
pub fn saturday_noon() -> NaiveDateTime {
    local(2026, 10, 17, 12, 0)
}

pub fn friday_noon() -> NaiveDateTime {
    local(2026, 10, 16, 12, 0)
}

/// Fresh in-memory database with the clock pinned to `now`.
pub async fn state_at(now: NaiveDateTime) -> AppState {
    let pool = db::init_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    AppState::new(pool, ShopRules::default(), "public").with_clock(Arc::new(FixedClock(now)))
}

pub async fn saturday_state() -> AppState {
    state_at(saturday_noon()).await
}

/// The `/api` routes without middleware.
pub fn api_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(handlers::json_config())
        .service(web::scope("/api").configure(handlers::configure))
}
