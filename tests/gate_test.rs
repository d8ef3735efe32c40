//! Registration window tests.
//!
//! Members and OBs open at 23:00 two days before; everyone else at 15:00 the
//! day before. All times are club local (+09:00).

mod common;

use chrono::TimeDelta;
use common::*;
use snuminton::models::ApplicantCategory;
use snuminton::registration::gate;

fn start() -> chrono::DateTime<chrono::FixedOffset> {
    practice("1", None).local_start(kst())
}

#[test]
fn test_member_and_ob_open_two_days_before_at_23() {
    for category in [ApplicantCategory::Member, ApplicantCategory::Ob] {
        let opens = gate::opening_instant(start(), &category);
        assert_eq!(opens.to_rfc3339(), "2024-01-08T23:00:00+09:00");
    }
}

#[test]
fn test_guest_opens_day_before_at_15() {
    let opens = gate::opening_instant(start(), &ApplicantCategory::Guest);
    assert_eq!(opens.to_rfc3339(), "2024-01-09T15:00:00+09:00");
}

#[test]
fn test_unknown_category_uses_general_window() {
    let coach = ApplicantCategory::from("coach".to_string());
    let opens = gate::opening_instant(start(), &coach);
    assert_eq!(opens.to_rfc3339(), "2024-01-09T15:00:00+09:00");
}

#[test]
fn test_gate_flips_exactly_at_opening() {
    let member = ApplicantCategory::Member;

    // 22:59:59 club time
    let closed = gate::evaluate(start(), &member, at("2024-01-08T13:59:59Z"));
    assert!(!closed.is_open);
    assert_eq!(closed.label(), "1/8 23:00");
    assert_eq!(closed.status_text(), "Opens 1/8 23:00");

    let open = gate::evaluate(start(), &member, at("2024-01-08T14:00:00Z"));
    assert!(open.is_open);
    assert_eq!(open.status_text(), "Open now");
}

#[test]
fn test_guest_still_closed_when_members_open() {
    let now = at("2024-01-09T05:59:00Z"); // 14:59 club time on the 9th
    assert!(gate::evaluate(start(), &ApplicantCategory::Member, now).is_open);
    assert!(!gate::evaluate(start(), &ApplicantCategory::Guest, now).is_open);
}

#[test]
fn test_gate_uses_calendar_date_not_elapsed_hours() {
    // 00:30 on the 10th: member window is still 23:00 on the 8th
    let early = event("2", "normal", "2024-01-10T00:30:00+09:00").local_start(kst());
    let opens = gate::opening_instant(early, &ApplicantCategory::Member);
    assert_eq!(opens.to_rfc3339(), "2024-01-08T23:00:00+09:00");
}

#[test]
fn test_utc_start_is_read_in_club_time() {
    let ev = event("3", "normal", "2024-01-10T10:00:00Z");
    let opens = gate::opening_instant(ev.local_start(kst()), &ApplicantCategory::Guest);
    assert_eq!(opens.to_rfc3339(), "2024-01-09T15:00:00+09:00");
}

#[test]
fn test_gate_is_monotonic_in_now() {
    let guest = ApplicantCategory::Guest;
    let mut now = at("2024-01-07T00:00:00Z");
    let mut seen_open = false;
    while now < at("2024-01-11T00:00:00Z") {
        let is_open = gate::evaluate(start(), &guest, now).is_open;
        if seen_open {
            assert!(is_open, "gate closed again at {now}");
        }
        seen_open |= is_open;
        now += TimeDelta::minutes(30);
    }
    assert!(seen_open);
}
