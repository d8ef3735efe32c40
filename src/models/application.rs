use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{de_id, lenient, null_as_default};

/// Membership category of an applicant (`user_type` column).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicantCategory {
    #[default]
    Member,
    Ob,
    Guest,
    Other(String),
}

impl From<String> for ApplicantCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "member" => ApplicantCategory::Member,
            "ob" => ApplicantCategory::Ob,
            "guest" => ApplicantCategory::Guest,
            _ => ApplicantCategory::Other(value),
        }
    }
}

impl From<ApplicantCategory> for String {
    fn from(category: ApplicantCategory) -> Self {
        category.as_str().to_string()
    }
}

impl ApplicantCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicantCategory::Member => "member",
            ApplicantCategory::Ob => "ob",
            ApplicantCategory::Guest => "guest",
            ApplicantCategory::Other(raw) => raw,
        }
    }

    /// Members and alumni get the earlier registration window.
    pub fn has_early_access(&self) -> bool {
        matches!(self, ApplicantCategory::Member | ApplicantCategory::Ob)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, ApplicantCategory::Guest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParticipationType {
    #[default]
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "partial_7_9")]
    Partial7To9,
    #[serde(rename = "partial_8_10")]
    Partial8To10,
}

impl ParticipationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationType::Full => "full",
            ParticipationType::Partial7To9 => "partial_7_9",
            ParticipationType::Partial8To10 => "partial_8_10",
        }
    }

    /// Court hours covered, as shown on the buttons and roster badges.
    pub fn hours(&self) -> &'static str {
        match self {
            ParticipationType::Full => "19-22",
            ParticipationType::Partial7To9 => "19-21",
            ParticipationType::Partial8To10 => "20-22",
        }
    }
}

impl FromStr for ParticipationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(ParticipationType::Full),
            "partial_7_9" => Ok(ParticipationType::Partial7To9),
            "partial_8_10" => Ok(ParticipationType::Partial8To10),
            other => Err(format!("unknown participation type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonChoice {
    #[default]
    TueThu,
    Sat,
}

impl LessonChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonChoice::TueThu => "tue_thu",
            LessonChoice::Sat => "sat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LessonChoice::TueThu => "Tue/Thu",
            LessonChoice::Sat => "Sat",
        }
    }
}

impl FromStr for LessonChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tue_thu" => Ok(LessonChoice::TueThu),
            "sat" => Ok(LessonChoice::Sat),
            other => Err(format!("unknown lesson choice: {other}")),
        }
    }
}

/// A sign-up row as read back from the `applications` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_id")]
    pub event_id: String,
    pub user_name: String,
    #[serde(rename = "user_type")]
    pub category: ApplicantCategory,
    /// Unrecognised values read as `None` and style as partial.
    #[serde(default, deserialize_with = "lenient")]
    pub participation_type: Option<ParticipationType>,
    #[serde(default, deserialize_with = "lenient")]
    pub lesson_choice: Option<LessonChoice>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub afterparty_join: bool,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    /// A missing participation value counts as partial for roster styling.
    pub fn is_full_participation(&self) -> bool {
        self.participation_type == Some(ParticipationType::Full)
    }
}

/// Fields a sign-up accepts, by event category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attendance {
    Regular { participation: ParticipationType },
    Lesson { lesson_choice: LessonChoice },
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub name: String,
    pub category: ApplicantCategory,
    pub guest_password: Option<String>,
}

/// A validated sign-up, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub event_id: String,
    pub applicant: Applicant,
    pub attendance: Attendance,
    pub afterparty_join: bool,
}

impl NewApplication {
    pub fn participation_type(&self) -> ParticipationType {
        match self.attendance {
            Attendance::Regular { participation } => participation,
            _ => ParticipationType::Full,
        }
    }

    pub fn lesson_choice(&self) -> Option<LessonChoice> {
        match self.attendance {
            Attendance::Lesson { lesson_choice } => Some(lesson_choice),
            _ => None,
        }
    }

    /// Flat record in the shape of the `applications` table.
    pub fn to_row(&self) -> ApplicationRow<'_> {
        ApplicationRow {
            event_id: &self.event_id,
            user_name: &self.applicant.name,
            user_type: self.applicant.category.as_str(),
            guest_password: if self.applicant.category.is_guest() {
                self.applicant.guest_password.as_deref()
            } else {
                None
            },
            participation_type: self.participation_type(),
            lesson_choice: self.lesson_choice(),
            afterparty_join: self.afterparty_join,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApplicationRow<'a> {
    pub event_id: &'a str,
    pub user_name: &'a str,
    pub user_type: &'a str,
    pub guest_password: Option<&'a str>,
    pub participation_type: ParticipationType,
    pub lesson_choice: Option<LessonChoice>,
    pub afterparty_join: bool,
}
