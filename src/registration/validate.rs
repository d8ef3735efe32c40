use chrono::{DateTime, FixedOffset, Utc};

use super::SignupForm;
use super::gate;
use crate::models::{Applicant, Attendance, Event, EventKind, NewApplication};
use crate::session::csrf::constant_time_eq;

/// Reasons a sign-up is rejected before it reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("The shared guest password does not match. Please ask a club member.")]
    BadGuestPassword,
    #[error("Sign-up opens at {opens_at}. Please wait until then.")]
    GateClosed { opens_at: String },
}

/// Club-wide rules the validator needs.
#[derive(Debug, Clone)]
pub struct SignupPolicy {
    pub guest_password: String,
    pub utc_offset: FixedOffset,
}

/// Fields the event's category accepts, taken from the form.
pub fn attendance_for(kind: &EventKind, form: &SignupForm) -> Attendance {
    match kind {
        EventKind::Normal => Attendance::Regular { participation: form.participation },
        EventKind::Lesson => Attendance::Lesson { lesson_choice: form.lesson_choice },
        EventKind::Special(_) => Attendance::Special,
    }
}

/// Check a submission and derive the record to insert.
///
/// Checks run in a fixed order: name, guest password, registration window.
pub fn validate(
    form: &SignupForm,
    event: &Event,
    policy: &SignupPolicy,
    now: DateTime<Utc>,
) -> Result<NewApplication, ValidationError> {
    let name = form.user_name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if form.category.is_guest() && !constant_time_eq(&form.guest_password, &policy.guest_password) {
        return Err(ValidationError::BadGuestPassword);
    }

    let gate = gate::evaluate(event.local_start(policy.utc_offset), &form.category, now);
    if !gate.is_open {
        return Err(ValidationError::GateClosed { opens_at: gate.label() });
    }

    Ok(NewApplication {
        event_id: event.id.clone(),
        applicant: Applicant {
            name: name.to_string(),
            category: form.category.clone(),
            guest_password: form.category.is_guest().then(|| form.guest_password.clone()),
        },
        attendance: attendance_for(&event.kind, form),
        afterparty_join: event.has_afterparty && form.afterparty_join,
    })
}
