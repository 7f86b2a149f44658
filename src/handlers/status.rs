use actix_web::{web, HttpResponse};
use chrono::Datelike;
use serde::Serialize;

use crate::shop::{availability, is_weekend, weekday_name, HoursBadge, OrderingState};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShopStatus {
    pub hours: HoursBadge,
    pub ordering: OrderingStatus,
    pub weekend: bool,
    /// Seconds until the page should re-evaluate the order window.
    pub next_check_in_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct OrderingStatus {
    pub state: OrderingState,
    pub open: bool,
    pub order_day: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let now = state.clock.now();
    let window = state.rules.order_window;
    let ordering_state = window.state_at(now);
    let open = ordering_state == OrderingState::Open;

    HttpResponse::Ok().json(ShopStatus {
        hours: state.rules.hours.badge_at(now),
        ordering: OrderingStatus {
            state: ordering_state,
            open,
            order_day: weekday_name(window.order_day()),
            notice: (!open).then(|| window.notice()),
        },
        weekend: is_weekend(now.weekday()),
        next_check_in_secs: availability::until_next_check(now).as_secs(),
    })
}
