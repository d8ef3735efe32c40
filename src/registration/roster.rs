use serde::Serialize;

use crate::models::{ApplicantCategory, Application};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Placement {
    Confirmed,
    Waitlisted { rank: usize },
}

/// Row styling bucket. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTone {
    Guest,
    Ob,
    Partial,
    Default,
}

impl RowTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            RowTone::Guest => "tone-guest",
            RowTone::Ob => "tone-ob",
            RowTone::Partial => "tone-partial",
            RowTone::Default => "tone-default",
        }
    }
}

/// Placement of the entry at `index` (0-based, submission order).
pub fn placement(index: usize, capacity: Option<usize>) -> Placement {
    match capacity {
        Some(cap) if index >= cap => Placement::Waitlisted { rank: index - cap + 1 },
        _ => Placement::Confirmed,
    }
}

/// Precedence: guest, then ob, then anything not plainly full attendance.
pub fn tone(application: &Application) -> RowTone {
    match application.category {
        ApplicantCategory::Guest => RowTone::Guest,
        ApplicantCategory::Ob => RowTone::Ob,
        _ if !application.is_full_participation() => RowTone::Partial,
        _ => RowTone::Default,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub position: usize,
    pub placement: Placement,
    pub tone: RowTone,
    pub application: Application,
}

impl RosterEntry {
    /// 1-based, zero-padded to two digits.
    pub fn number(&self) -> String {
        format!("{:02}", self.position + 1)
    }

    pub fn waitlist_rank(&self) -> Option<usize> {
        match self.placement {
            Placement::Waitlisted { rank } => Some(rank),
            Placement::Confirmed => None,
        }
    }
}

/// Sign-ups for one event split into confirmed places and the waitlist.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub capacity: Option<usize>,
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// `applications` should already be oldest first; the sort is stable so
    /// equal timestamps keep the order the store returned.
    pub fn build(mut applications: Vec<Application>, capacity: Option<usize>) -> Self {
        applications.sort_by_key(|a| a.applied_at);
        let entries = applications
            .into_iter()
            .enumerate()
            .map(|(position, application)| RosterEntry {
                position,
                placement: placement(position, capacity),
                tone: tone(&application),
                application,
            })
            .collect();
        Self { capacity, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn confirmed_count(&self) -> usize {
        match self.capacity {
            Some(cap) => self.len().min(cap),
            None => self.len(),
        }
    }

    pub fn waitlist_count(&self) -> usize {
        self.len() - self.confirmed_count()
    }

    /// Header counter, e.g. `13 / 10`; unlimited events show `13 / -`.
    pub fn count_label(&self) -> String {
        match self.capacity {
            Some(cap) => format!("{} / {}", self.len(), cap),
            None => format!("{} / -", self.len()),
        }
    }
}
