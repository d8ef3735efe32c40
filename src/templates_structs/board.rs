use askama::Template;
use chrono::{DateTime, FixedOffset, Utc};

use super::PageContext;
use crate::models::calendar::CalendarMonth;
use crate::models::{ApplicantCategory, Event, Poll};
use crate::registration::{Roster, RosterEntry, SignupForm, gate};

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub ctx: PageContext,
    pub calendar: CalendarMonth,
    pub weekday_headers: [&'static str; 7],
    pub specials: Vec<SpecialEventCard>,
    pub polls: Vec<PollCard>,
    pub panel: Option<EventPanel>,
}

/// A non-regular event in the strip under the calendar.
pub struct SpecialEventCard {
    pub title: String,
    pub badge: &'static str,
    pub kind_class: &'static str,
    pub date_label: String,
    pub link: String,
}

impl SpecialEventCard {
    pub fn from_event(event: &Event, offset: FixedOffset) -> Self {
        let local = event.local_start(offset);
        Self {
            title: event.title.clone(),
            badge: event.kind.strip_label(),
            kind_class: event.kind.css_class(),
            date_label: local.format("%B %-d (%a)").to_string(),
            link: board_link(&local.format("%Y-%m").to_string(), &event.id, "info"),
        }
    }
}

pub struct PollCard {
    pub title: String,
    pub badge: &'static str,
    pub is_text: bool,
    pub deadline_label: Option<String>,
}

impl PollCard {
    pub fn from_poll(poll: &Poll, offset: FixedOffset) -> Self {
        Self {
            title: poll.title.clone(),
            badge: poll.badge(),
            is_text: poll.is_text(),
            deadline_label: poll
                .deadline
                .map(|d| d.at(offset).format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

/// Current form values, as strings the template can compare against.
pub struct FormView {
    pub user_name: String,
    pub category: String,
    pub participation: String,
    pub lesson_choice: String,
    pub afterparty_join: bool,
}

impl From<&SignupForm> for FormView {
    fn from(form: &SignupForm) -> Self {
        Self {
            user_name: form.user_name.clone(),
            category: form.category.as_str().to_string(),
            participation: form.participation.as_str().to_string(),
            lesson_choice: form.lesson_choice.as_str().to_string(),
            afterparty_join: form.afterparty_join,
        }
    }
}

pub struct RosterRow {
    pub number: String,
    pub name: String,
    pub category: String,
    pub tone_class: &'static str,
    pub waitlist_rank: Option<usize>,
    pub lesson_badge: Option<&'static str>,
    pub afterparty: bool,
    pub partial_hours: Option<&'static str>,
    pub applied_date: String,
    pub applied_time: String,
}

impl RosterRow {
    pub fn from_entry(entry: &RosterEntry, offset: FixedOffset) -> Self {
        let app = &entry.application;
        let applied = app.applied_at.with_timezone(&offset);
        Self {
            number: entry.number(),
            name: app.user_name.clone(),
            category: app.category.as_str().to_string(),
            tone_class: entry.tone.css_class(),
            waitlist_rank: entry.waitlist_rank(),
            lesson_badge: app.lesson_choice.map(|c| c.label()),
            afterparty: app.afterparty_join,
            partial_hours: app
                .participation_type
                .filter(|_| !app.is_full_participation())
                .map(|p| p.hours()),
            applied_date: applied.format("%m/%d").to_string(),
            applied_time: applied.format("%H:%M").to_string(),
        }
    }
}

/// One registration window as listed above the submit button.
pub struct GateWindow {
    pub audience: &'static str,
    pub is_open: bool,
    pub status: String,
}

impl GateWindow {
    fn evaluate(
        audience: &'static str,
        local_start: DateTime<FixedOffset>,
        category: ApplicantCategory,
        now: DateTime<Utc>,
    ) -> Self {
        let gate = gate::evaluate(local_start, &category, now);
        Self { audience, is_open: gate.is_open, status: gate.status_text() }
    }
}

/// The selected event: details, sign-up form and roster.
pub struct EventPanel {
    pub id: String,
    pub title: String,
    pub kind_label: &'static str,
    pub is_normal: bool,
    pub is_lesson: bool,
    pub has_afterparty: bool,
    pub start_label: String,
    pub location: String,
    pub capacity_label: String,
    pub tab: String,
    pub month: String,
    pub action_url: String,
    pub info_link: String,
    pub list_link: String,
    pub close_link: String,
    pub form: FormView,
    /// Both windows, whatever category the session last used. The gate
    /// itself is enforced on submit.
    pub windows: Vec<GateWindow>,
    pub count_label: String,
    pub roster_len: usize,
    pub rows: Vec<RosterRow>,
}

impl EventPanel {
    pub fn build(
        event: &Event,
        roster: &Roster,
        form: &SignupForm,
        tab: &str,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        let local = event.local_start(offset);
        let month = local.format("%Y-%m").to_string();
        let tab = if tab == "list" { "list" } else { "info" };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            kind_label: event.kind.label(),
            is_normal: event.kind.is_normal(),
            is_lesson: event.kind.is_lesson(),
            has_afterparty: event.has_afterparty,
            start_label: local.format("%A, %B %-d, %Y %H:%M").to_string(),
            location: event.location_or_default().to_string(),
            capacity_label: match event.capacity() {
                Some(cap) => format!("Capacity {cap}"),
                None => "No capacity limit".to_string(),
            },
            tab: tab.to_string(),
            action_url: format!("/events/{}/applications", event.id),
            info_link: board_link(&month, &event.id, "info"),
            list_link: board_link(&month, &event.id, "list"),
            close_link: format!("/?month={month}"),
            month,
            form: FormView::from(form),
            windows: vec![
                GateWindow::evaluate("Members & OB", local, ApplicantCategory::Member, now),
                GateWindow::evaluate("Guests", local, ApplicantCategory::Guest, now),
            ],
            count_label: roster.count_label(),
            roster_len: roster.len(),
            rows: roster.entries.iter().map(|e| RosterRow::from_entry(e, offset)).collect(),
        }
    }
}

/// Link back to the board with an event panel open.
pub fn board_link(month: &str, event_id: &str, tab: &str) -> String {
    format!("/?month={month}&event={event_id}&tab={tab}")
}
