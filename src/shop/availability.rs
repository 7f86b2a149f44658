//! Day-of-week gate for food ordering.
//!
//! Ordering is open only on the designated order day. The state is a pure
//! function of local time; the page re-checks it at every local midnight and
//! the server re-validates each submitted order.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use super::{weekday_name, Clock};

/// Slack added past midnight so the re-check never lands on the old day.
const MIDNIGHT_MARGIN: Duration = Duration::from_secs(1);
const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderingState {
    #[serde(rename = "ORDERING_OPEN")]
    Open,
    #[serde(rename = "ORDERING_CLOSED")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWindow {
    order_day: Weekday,
}

impl OrderWindow {
    pub const fn new(order_day: Weekday) -> Self {
        Self { order_day }
    }

    pub const fn order_day(&self) -> Weekday {
        self.order_day
    }

    pub fn state_at(&self, now: NaiveDateTime) -> OrderingState {
        if now.weekday() == self.order_day {
            OrderingState::Open
        } else {
            OrderingState::Closed
        }
    }

    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        self.state_at(now) == OrderingState::Open
    }

    /// Text shown next to the disabled order form.
    pub fn notice(&self) -> String {
        format!(
            "Orders are only available on {}. You can browse the menu, but orders cannot be placed on other days.",
            weekday_name(self.order_day)
        )
    }
}

/// Delay until the gate should be evaluated again: the next local midnight.
pub fn until_next_check(now: NaiveDateTime) -> Duration {
    let midnight = now
        .date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0));

    let remaining = midnight
        .and_then(|midnight| (midnight - now).to_std().ok())
        .unwrap_or(ONE_DAY);

    remaining + MIDNIGHT_MARGIN
}

/// Re-evaluates the order window at every local midnight and logs transitions.
pub fn spawn_midnight_recheck(clock: Arc<dyn Clock>, window: OrderWindow) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous = None;
        loop {
            let now = clock.now();
            let state = window.state_at(now);
            if previous != Some(state) {
                info!(
                    ?state,
                    order_day = weekday_name(window.order_day()),
                    "order window evaluated"
                );
                previous = Some(state);
            }
            tokio::time::sleep(until_next_check(now)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        // October 2026: the 17th is a Saturday.
        NaiveDate::from_ymd_opt(2026, 10, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[rstest]
    #[case(at(17, 0, 0), OrderingState::Open)]
    #[case(at(17, 23, 59), OrderingState::Open)]
    #[case(at(16, 12, 0), OrderingState::Closed)]
    #[case(at(18, 0, 0), OrderingState::Closed)]
    #[case(at(19, 9, 30), OrderingState::Closed)]
    fn saturday_window(#[case] now: NaiveDateTime, #[case] expected: OrderingState) {
        let window = OrderWindow::new(Weekday::Sat);
        assert_eq!(window.state_at(now), expected);
    }

    #[test]
    fn other_order_day_is_honoured() {
        let window = OrderWindow::new(Weekday::Fri);
        assert!(window.is_open_at(at(16, 10, 0)));
        assert!(!window.is_open_at(at(17, 10, 0)));
    }

    #[test]
    fn next_check_lands_just_after_midnight() {
        assert_eq!(
            until_next_check(at(16, 23, 0)),
            Duration::from_secs(60 * 60 + 1)
        );
        assert_eq!(until_next_check(at(17, 0, 0)), ONE_DAY + MIDNIGHT_MARGIN);
    }

    #[test]
    fn notice_names_the_order_day() {
        let notice = OrderWindow::new(Weekday::Sat).notice();
        assert!(notice.starts_with("Orders are only available on Saturday."));
    }

    #[test]
    fn state_serializes_as_gate_names() {
        assert_eq!(
            serde_json::to_value(OrderingState::Closed).unwrap(),
            serde_json::json!("ORDERING_CLOSED")
        );
    }
}
