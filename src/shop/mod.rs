//! Time-based shop rules: the Saturday order window, the business-hours badge
//! and the order price estimate.

pub mod availability;
pub mod catalog;
pub mod clock;
pub mod hours;
pub mod pricing;

use chrono::Weekday;

pub use availability::{OrderWindow, OrderingState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use hours::{BusinessHours, HoursBadge};

#[derive(Debug, Clone, Copy)]
pub struct ShopRules {
    pub order_window: OrderWindow,
    pub hours: BusinessHours,
    /// Reject orders server-side outside the order window.
    pub enforce_order_day: bool,
}

impl Default for ShopRules {
    fn default() -> Self {
        Self {
            order_window: OrderWindow::new(Weekday::Sat),
            hours: BusinessHours::default(),
            enforce_order_day: true,
        }
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Saturday or Sunday, when the weekend banner is shown.
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
