use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::calendar;
use crate::models::{ApplicantCategory, Event};
use crate::registration::{gate, Roster};
use crate::state::AppState;

const MAX_RANGE_DAYS: i64 = 92;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize)]
pub struct GateQuery {
    pub category: Option<String>,
}

async fn find_event(state: &AppState, id: &str) -> Result<Event, AppError> {
    state
        .store
        .list_events()
        .await?
        .into_iter()
        .find(|ev| ev.id == id)
        .ok_or(AppError::NotFound)
}

/// GET /api/events?start=YYYY-MM-DD&end=YYYY-MM-DD: calendar feed.
pub async fn events_feed(
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    let offset = state.offset();
    let today = state.now().with_timezone(&offset).date_naive();
    let start = query
        .start
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(today);
    let end = query
        .end
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| start + chrono::Duration::days(6));

    if end < start {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "end must not be before start"
        })));
    }
    if end > start + chrono::Duration::days(MAX_RANGE_DAYS) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Date range must not exceed {MAX_RANGE_DAYS} days")
        })));
    }

    let events = state.store.list_events().await?;
    let entries = calendar::entries_between(&events, start, end, offset);
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/events/{id}/roster: confirmed places and waitlist.
pub async fn roster(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let event = find_event(&state, &path.into_inner()).await?;
    let rows = state.store.list_applications(&event.id).await?;
    let roster = Roster::build(rows, event.capacity());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "event_id": event.id,
        "count_label": roster.count_label(),
        "confirmed": roster.confirmed_count(),
        "waitlisted": roster.waitlist_count(),
        "roster": roster,
    })))
}

/// GET /api/events/{id}/gate?category=member: registration window for one category.
pub async fn gate_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<GateQuery>,
) -> Result<HttpResponse, AppError> {
    let event = find_event(&state, &path.into_inner()).await?;
    let category = ApplicantCategory::from(query.category.clone().unwrap_or_else(|| "member".to_string()));
    let status = gate::evaluate(event.local_start(state.offset()), &category, state.now());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "event_id": event.id,
        "category": category,
        "opens_at": status.opens_at.to_rfc3339(),
        "is_open": status.is_open,
        "label": status.label(),
    })))
}
