//! Open/closed badge for the café and repair counter.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use super::weekday_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    first_day: Weekday,
    last_day: Weekday,
    open_hour: u32,
    close_hour: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursStatus {
    Open,
    OpensToday,
    OpensTomorrow,
    OpensNextBusinessDay(Weekday),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursBadge {
    pub open: bool,
    pub message: String,
    pub range: String,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            first_day: Weekday::Mon,
            last_day: Weekday::Sat,
            open_hour: 8,
            close_hour: 18,
        }
    }
}

impl BusinessHours {
    /// Returns `None` unless `open_hour < close_hour <= 24`.
    pub fn new(first_day: Weekday, last_day: Weekday, open_hour: u32, close_hour: u32) -> Option<Self> {
        if open_hour >= close_hour || close_hour > 24 {
            return None;
        }
        Some(Self {
            first_day,
            last_day,
            open_hour,
            close_hour,
        })
    }

    /// Business days form an inclusive range that may wrap past Sunday.
    pub fn is_business_day(&self, day: Weekday) -> bool {
        let first = self.first_day.num_days_from_monday();
        let last = self.last_day.num_days_from_monday();
        let day = day.num_days_from_monday();
        if first <= last {
            (first..=last).contains(&day)
        } else {
            day >= first || day <= last
        }
    }

    fn next_business_day(&self, after: Weekday) -> Weekday {
        let mut day = after.succ();
        for _ in 0..7 {
            if self.is_business_day(day) {
                return day;
            }
            day = day.succ();
        }
        self.first_day
    }

    pub fn status_at(&self, now: NaiveDateTime) -> HoursStatus {
        let day = now.weekday();
        let hour = now.hour();

        if !self.is_business_day(day) {
            return HoursStatus::OpensNextBusinessDay(self.next_business_day(day));
        }
        if hour < self.open_hour {
            HoursStatus::OpensToday
        } else if hour < self.close_hour {
            HoursStatus::Open
        } else if self.is_business_day(day.succ()) {
            HoursStatus::OpensTomorrow
        } else {
            HoursStatus::OpensNextBusinessDay(self.next_business_day(day))
        }
    }

    pub fn range_label(&self) -> String {
        format!("{:02}:00–{:02}:00", self.open_hour, self.close_hour)
    }

    fn opening_label(&self) -> String {
        format!("{:02}:00", self.open_hour)
    }

    pub fn badge_at(&self, now: NaiveDateTime) -> HoursBadge {
        let status = self.status_at(now);
        let message = match status {
            HoursStatus::Open => format!("Open now · {}", self.range_label()),
            HoursStatus::OpensToday => format!("Closed · opens today at {}", self.opening_label()),
            HoursStatus::OpensTomorrow => {
                format!("Closed · opens tomorrow at {}", self.opening_label())
            }
            HoursStatus::OpensNextBusinessDay(day) => format!(
                "Closed · opens next business day ({}) at {}",
                weekday_name(day),
                self.opening_label()
            ),
        };

        HoursBadge {
            open: status == HoursStatus::Open,
            message,
            range: self.range_label(),
        }
    }
}
