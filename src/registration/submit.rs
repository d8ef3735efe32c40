use chrono::{DateTime, Utc};

use super::inflight::InFlightGuard;
use super::roster::Roster;
use super::validate::{SignupPolicy, ValidationError, validate};
use super::SignupForm;
use crate::models::{Event, NewApplication};
use crate::store::{SignupStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("An error occurred while signing up: {0}")]
    Store(#[from] StoreError),
    #[error("A sign-up for {0} is already being processed.")]
    AlreadyInFlight(String),
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub application: NewApplication,
    /// The event's roster as re-read after the insert.
    pub roster: Roster,
    /// The form to show next.
    pub next_form: SignupForm,
}

/// Validate, insert, and re-read the roster for one sign-up.
///
/// Nothing is written when validation fails or another submission with the
/// same event and name is still pending.
pub async fn submit(
    store: &dyn SignupStore,
    guard: &InFlightGuard,
    policy: &SignupPolicy,
    event: &Event,
    form: &SignupForm,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, SubmitError> {
    let application = validate(form, event, policy, now)?;

    let _ticket = guard
        .try_acquire(&event.id, &application.applicant.name)
        .ok_or_else(|| SubmitError::AlreadyInFlight(application.applicant.name.clone()))?;

    store.insert_application(&application).await?;
    log::info!(
        "Sign-up recorded: event={} name={} type={}",
        event.id,
        application.applicant.name,
        application.applicant.category.as_str()
    );

    let rows = match store.list_applications(&event.id).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("Roster re-read for event {} failed: {e}", event.id);
            Vec::new()
        }
    };

    Ok(SubmitOutcome {
        application,
        roster: Roster::build(rows, event.capacity()),
        next_form: form.reset(),
    })
}
