use std::ops::RangeInclusive;

use chrono::{Datelike, Days, FixedOffset, Months, NaiveDate};
use serde::Serialize;

use super::Event;

/// One event chip on a calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub date: String,       // YYYY-MM-DD, club local
    pub start_time: String, // HH:MM, club local
    pub start: String,      // RFC 3339, club local
    pub kind: String,
    pub kind_class: String,
}

#[derive(Debug, Clone)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub entries: Vec<CalendarEntry>,
}

/// A month grid, weeks running Sunday to Saturday.
#[derive(Debug, Clone)]
pub struct CalendarMonth {
    pub first: NaiveDate,
    pub title: String,
    pub param: String,
    pub prev_param: String,
    pub next_param: String,
    pub weeks: Vec<Vec<CalendarDay>>,
}

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Years a `month=` parameter may name. Keeps the grid and its neighbour
/// links well inside chrono's date range.
const MONTH_YEARS: RangeInclusive<i32> = 1..=9999;

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    if !MONTH_YEARS.contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, 1)
}

pub fn month_param(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Calendar entries for events starting within `[start, end]` (club local dates),
/// ordered by start time.
pub fn entries_between(
    events: &[Event],
    start: NaiveDate,
    end: NaiveDate,
    offset: FixedOffset,
) -> Vec<CalendarEntry> {
    let mut dated: Vec<_> = events
        .iter()
        .map(|ev| (ev.local_start(offset), ev))
        .filter(|(local, _)| {
            let d = local.date_naive();
            d >= start && d <= end
        })
        .collect();
    dated.sort_by_key(|(local, _)| *local);

    dated
        .into_iter()
        .map(|(local, ev)| CalendarEntry {
            id: ev.id.clone(),
            title: ev.title.clone(),
            date: local.format("%Y-%m-%d").to_string(),
            start_time: local.format("%H:%M").to_string(),
            start: local.to_rfc3339(),
            kind: String::from(ev.kind.clone()),
            kind_class: ev.kind.css_class().to_string(),
        })
        .collect()
}

struct MonthBounds {
    prev_first: NaiveDate,
    first: NaiveDate,
    next_first: NaiveDate,
    grid_start: NaiveDate,
    grid_end: NaiveDate,
}

/// Month boundaries plus the Sunday..Saturday span covering the month.
/// `None` at the edges of chrono's range.
fn month_bounds(month: NaiveDate) -> Option<MonthBounds> {
    let first = first_of_month(month);
    let prev_first = first.checked_sub_months(Months::new(1))?;
    let next_first = first.checked_add_months(Months::new(1))?;
    let last = next_first.checked_sub_days(Days::new(1))?;

    let grid_start =
        first.checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_sunday())))?;
    let grid_end =
        last.checked_add_days(Days::new(u64::from(6 - last.weekday().num_days_from_sunday())))?;
    Some(MonthBounds { prev_first, first, next_first, grid_start, grid_end })
}

/// Build the month grid containing `month` (any day of it). A month too close
/// to the ends of the calendar falls back to the month containing `today`.
pub fn build_month(
    month: NaiveDate,
    today: NaiveDate,
    events: &[Event],
    offset: FixedOffset,
) -> CalendarMonth {
    let bounds = month_bounds(month).or_else(|| month_bounds(today)).unwrap_or(MonthBounds {
        prev_first: today,
        first: today,
        next_first: today,
        grid_start: today,
        grid_end: today,
    });
    let MonthBounds { prev_first, first, next_first, grid_start, grid_end } = bounds;

    let mut entries = entries_between(events, grid_start, grid_end, offset).into_iter().peekable();

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut d = grid_start;
    while d <= grid_end {
        let key = d.format("%Y-%m-%d").to_string();
        let mut day_entries = Vec::new();
        while let Some(entry) = entries.next_if(|e| e.date == key) {
            day_entries.push(entry);
        }

        week.push(CalendarDay {
            date: d,
            day: d.day(),
            in_month: d.month() == first.month(),
            is_today: d == today,
            entries: day_entries,
        });
        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }

        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    CalendarMonth {
        first,
        title: first.format("%B %Y").to_string(),
        param: month_param(first),
        prev_param: month_param(prev_first),
        next_param: month_param(next_first),
        weeks,
    }
}
