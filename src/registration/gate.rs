use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use crate::models::{ApplicantCategory, localize};

/// Members and OBs may sign up from 23:00 two days before the event.
pub const EARLY_ACCESS_DAYS_BEFORE: u64 = 2;
pub const EARLY_ACCESS_HOUR: i64 = 23;
/// Everyone else from 15:00 the day before.
pub const GENERAL_DAYS_BEFORE: u64 = 1;
pub const GENERAL_HOUR: i64 = 15;

/// Registration window state for one (event, category) at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gate {
    pub opens_at: DateTime<FixedOffset>,
    pub is_open: bool,
}

/// The instant sign-ups open, in the same offset as `event_start`.
pub fn opening_instant(
    event_start: DateTime<FixedOffset>,
    category: &ApplicantCategory,
) -> DateTime<FixedOffset> {
    let (days_before, hour) = if category.has_early_access() {
        (EARLY_ACCESS_DAYS_BEFORE, EARLY_ACCESS_HOUR)
    } else {
        (GENERAL_DAYS_BEFORE, GENERAL_HOUR)
    };

    let day = event_start.date_naive() - Days::new(days_before);
    let wall_clock = day.and_time(NaiveTime::MIN) + TimeDelta::hours(hour);
    localize(wall_clock, *event_start.offset())
}

pub fn evaluate(
    event_start: DateTime<FixedOffset>,
    category: &ApplicantCategory,
    now: DateTime<Utc>,
) -> Gate {
    let opens_at = opening_instant(event_start, category);
    Gate { opens_at, is_open: now >= opens_at }
}

impl Gate {
    /// Short month/day and time, e.g. `1/8 23:00`. Display only.
    pub fn label(&self) -> String {
        self.opens_at.format("%-m/%-d %H:%M").to_string()
    }

    pub fn status_text(&self) -> String {
        if self.is_open {
            "Open now".to_string()
        } else {
            format!("Opens {}", self.label())
        }
    }
}
