use serde::{Deserialize, Serialize};

use crate::models::{ApplicantCategory, LessonChoice, ParticipationType};

/// Everything the sign-up form holds between requests.
///
/// Kept in the session so a rejected submission comes back with the user's
/// input intact. The guest password is never written to the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub user_name: String,
    pub category: ApplicantCategory,
    #[serde(skip)]
    pub guest_password: String,
    pub participation: ParticipationType,
    pub lesson_choice: LessonChoice,
    pub afterparty_join: bool,
}

impl SignupForm {
    /// The form after a successful sign-up: transient fields cleared, category kept.
    pub fn reset(&self) -> Self {
        Self {
            category: self.category.clone(),
            ..Self::default()
        }
    }

    /// Build from submitted form fields; absent or unknown values fall back to defaults.
    pub fn from_fields(
        user_name: &str,
        user_type: &str,
        guest_password: Option<&str>,
        participation: Option<&str>,
        lesson_choice: Option<&str>,
        afterparty_join: Option<&str>,
    ) -> Self {
        Self {
            user_name: user_name.to_string(),
            category: ApplicantCategory::from(user_type.trim().to_string()),
            guest_password: guest_password.unwrap_or_default().to_string(),
            participation: participation.and_then(|p| p.parse().ok()).unwrap_or_default(),
            lesson_choice: lesson_choice.and_then(|l| l.parse().ok()).unwrap_or_default(),
            afterparty_join: matches!(afterparty_join, Some("true" | "yes" | "on" | "1")),
        }
    }
}
