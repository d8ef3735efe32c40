//! Sign-up submission.
//!
//! Handles the POST from the event panel form. Every outcome ends in a
//! redirect back to the board with a flash message; rejected input is kept in
//! the session so the form comes back filled in.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::registration::{self, SignupForm, SubmitError};
use crate::session::{csrf, save_form, set_flash};
use crate::state::AppState;
use crate::templates_structs::board_link;

#[derive(Deserialize)]
pub struct SignupFormData {
    pub csrf_token: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_type: String,
    pub guest_password: Option<String>,
    pub participation_type: Option<String>,
    pub lesson_choice: Option<String>,
    pub afterparty_join: Option<String>,
}

impl SignupFormData {
    fn to_signup_form(&self) -> SignupForm {
        SignupForm::from_fields(
            &self.user_name,
            &self.user_type,
            self.guest_password.as_deref(),
            self.participation_type.as_deref(),
            self.lesson_choice.as_deref(),
            self.afterparty_join.as_deref(),
        )
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

/// POST /events/{id}/applications: submit a sign-up.
pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<SignupFormData>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let event_id = path.into_inner();
    let signup = form.to_signup_form();
    save_form(&session, &signup);

    let events = match state.store.list_events().await {
        Ok(events) => events,
        Err(e) => {
            log::warn!("Loading events for sign-up failed: {e}");
            set_flash(&session, &format!("An error occurred while signing up: {e}"));
            return Ok(see_other("/"));
        }
    };
    let Some(event) = events.into_iter().find(|ev| ev.id == event_id) else {
        return Err(AppError::NotFound);
    };

    let month = event.local_start(state.offset()).format("%Y-%m").to_string();

    match registration::submit(
        state.store.as_ref(),
        &state.guard,
        &state.policy,
        &event,
        &signup,
        state.now(),
    )
    .await
    {
        Ok(outcome) => {
            let name = &outcome.application.applicant.name;
            let mut message = format!("{name}, your sign-up is complete! 🏸");
            let rank = outcome
                .roster
                .entries
                .iter()
                .rev()
                .find(|entry| entry.application.user_name == *name)
                .and_then(|entry| entry.waitlist_rank());
            if let Some(rank) = rank {
                message.push_str(&format!(" You are number {rank} on the waitlist."));
            }

            save_form(&session, &outcome.next_form);
            set_flash(&session, &message);
            Ok(see_other(&board_link(&month, &event.id, "list")))
        }
        Err(e) => {
            match &e {
                SubmitError::Store(err) => log::warn!("Sign-up for event {} failed: {err}", event.id),
                other => log::info!("Sign-up for event {} rejected: {other}", event.id),
            }
            set_flash(&session, &e.to_string());
            Ok(see_other(&board_link(&month, &event.id, "info")))
        }
    }
}
