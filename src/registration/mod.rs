//! Sign-up rules: the registration window, input checks, and roster ordering.
//!
//! Everything here is a pure function of its arguments except `submit`,
//! which goes through the store. Callers pass the current time in.

pub mod form;
pub mod gate;
pub mod inflight;
pub mod roster;
pub mod submit;
pub mod validate;

pub use form::SignupForm;
pub use gate::Gate;
pub use inflight::InFlightGuard;
pub use roster::{Placement, Roster, RosterEntry, RowTone};
pub use submit::{SubmitError, SubmitOutcome, submit};
pub use validate::{SignupPolicy, ValidationError, validate};
