use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::{render, AppError};
use crate::models::calendar::{self, WEEKDAY_HEADERS};
use crate::models::EventKind;
use crate::registration::Roster;
use crate::session::load_form;
use crate::state::AppState;
use crate::templates_structs::{BoardTemplate, EventPanel, PageContext, PollCard, SpecialEventCard};

#[derive(Deserialize)]
pub struct BoardQuery {
    pub month: Option<String>,
    pub event: Option<String>,
    pub tab: Option<String>,
}

/// GET /: calendar, special events, polls and (with `?event=`) the event panel.
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<BoardQuery>,
) -> Result<HttpResponse, AppError> {
    let offset = state.offset();
    let now = state.now();
    let today = now.with_timezone(&offset).date_naive();

    let (events, polls) = tokio::join!(state.store.list_events(), state.store.list_polls());
    let mut events = events.unwrap_or_else(|e| {
        log::warn!("Loading events failed: {e}");
        Vec::new()
    });
    events.sort_by_key(|ev| ev.local_start(offset));
    let polls = polls.unwrap_or_else(|e| {
        log::warn!("Loading polls failed: {e}");
        Vec::new()
    });

    let mut ctx = PageContext::build(&session, &state.app_name);

    let selected = query
        .event
        .as_deref()
        .map(|id| (id, events.iter().find(|ev| ev.id == id)));

    let panel = match selected {
        Some((_, Some(event))) => {
            let rows = state.store.list_applications(&event.id).await.unwrap_or_else(|e| {
                log::warn!("Loading sign-ups for event {} failed: {e}", event.id);
                Vec::new()
            });
            let roster = Roster::build(rows, event.capacity());
            let form = load_form(&session);
            let tab = query.tab.as_deref().unwrap_or("info");
            Some(EventPanel::build(event, &roster, &form, tab, now, offset))
        }
        Some((id, None)) => {
            log::warn!("Board requested unknown event {id}");
            ctx.flash.get_or_insert_with(|| "Event not found".to_string());
            None
        }
        None => None,
    };

    let month = query
        .month
        .as_deref()
        .and_then(calendar::parse_month)
        .or_else(|| match selected {
            Some((_, Some(event))) => Some(event.local_start(offset).date_naive()),
            _ => None,
        })
        .unwrap_or(today);

    let specials = events
        .iter()
        .filter(|ev| ev.kind != EventKind::Normal)
        .map(|ev| SpecialEventCard::from_event(ev, offset))
        .collect();
    let polls = polls.iter().map(|p| PollCard::from_poll(p, offset)).collect();

    let tmpl = BoardTemplate {
        ctx,
        calendar: calendar::build_month(month, today, &events, offset),
        weekday_headers: WEEKDAY_HEADERS,
        specials,
        polls,
        panel,
    };
    render(tmpl)
}
