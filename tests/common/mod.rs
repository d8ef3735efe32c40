//! Shared fixtures for the sign-up board tests.
//!
//! Events, sign-up rows and configuration are built in memory; nothing here
//! talks to a real backend.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use snuminton::config::Config;
use snuminton::models::{
    Application, ApplicantCategory, Event, EventKind, EventStart, ParticipationType,
};
use snuminton::registration::{SignupForm, SignupPolicy};
use snuminton::store::MemoryStore;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const GUEST_PASSWORD: &str = "5678";

/// Tuesday practice, 19:00 club time.
pub const PRACTICE_START: &str = "2024-01-10T19:00:00+09:00";

// ============================================================================
// TIME
// ============================================================================

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid offset")
}

/// Parse an RFC 3339 instant.
pub fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

// ============================================================================
// ROWS
// ============================================================================

pub fn event(id: &str, kind: &str, start: &str) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        start_at: EventStart::parse(start).expect("valid start"),
        kind: EventKind::from(kind.to_string()),
        location: Some("Main gym".to_string()),
        max_capacity: None,
        has_afterparty: false,
    }
}

pub fn practice(id: &str, capacity: Option<i64>) -> Event {
    Event {
        title: "Tuesday practice".to_string(),
        max_capacity: capacity,
        ..event(id, "normal", PRACTICE_START)
    }
}

/// A stored sign-up; `seq` orders rows one second apart.
pub fn application(
    seq: i64,
    event_id: &str,
    name: &str,
    category: &str,
    participation: Option<ParticipationType>,
) -> Application {
    Application {
        id: seq.to_string(),
        event_id: event_id.to_string(),
        user_name: name.to_string(),
        category: ApplicantCategory::from(category.to_string()),
        participation_type: participation,
        lesson_choice: None,
        afterparty_join: false,
        applied_at: at("2024-01-08T14:00:00Z") + TimeDelta::seconds(seq),
    }
}

pub fn members(event_id: &str, count: i64) -> Vec<Application> {
    (0..count)
        .map(|i| application(i, event_id, &format!("Member {i}"), "member", Some(ParticipationType::Full)))
        .collect()
}

// ============================================================================
// FORMS AND SETTINGS
// ============================================================================

pub fn form(name: &str, category: &str) -> SignupForm {
    SignupForm::from_fields(name, category, None, None, None, None)
}

pub fn guest_form(name: &str, password: &str) -> SignupForm {
    SignupForm::from_fields(name, "guest", Some(password), None, None, None)
}

pub fn policy() -> SignupPolicy {
    SignupPolicy {
        guest_password: GUEST_PASSWORD.to_string(),
        utc_offset: kst(),
    }
}

pub fn test_config(backend_url: &str) -> Config {
    let backend_url = backend_url.to_string();
    Config::from_lookup(move |key| match key {
        "BACKEND_URL" => Some(backend_url.clone()),
        "BACKEND_ANON_KEY" => Some("test-anon-key".to_string()),
        _ => None,
    })
    .expect("valid test config")
}

pub fn store_with(events: Vec<Event>) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_events(events))
}
