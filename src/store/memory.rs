use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Offset, TimeDelta, Utc};

use super::{SignupStore, StoreError};
use crate::models::{Application, Event, NewApplication, Poll};

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    polls: Vec<Poll>,
    applications: Vec<Application>,
    next_id: u64,
    last_applied_at: Option<DateTime<Utc>>,
    insert_failure: Option<String>,
}

/// In-process stand-in for the hosted backend.
///
/// Assigns ids and strictly increasing `applied_at` values the way the real
/// tables do, and can be told to reject inserts.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        self.lock().events = events;
        self
    }

    pub fn with_polls(self, polls: Vec<Poll>) -> Self {
        self.lock().polls = polls;
        self
    }

    /// Seed an existing sign-up row as-is.
    pub fn push_application(&self, application: Application) {
        let mut tables = self.lock();
        tables.last_applied_at = tables.last_applied_at.max(Some(application.applied_at));
        tables.applications.push(application);
    }

    /// Make every following insert fail with this backend message.
    pub fn fail_inserts_with(&self, message: &str) {
        self.lock().insert_failure = Some(message.to_string());
    }

    pub fn application_count(&self) -> usize {
        self.lock().applications.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.lock().events.clone())
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let mut polls = self.lock().polls.clone();
        let utc = Utc.fix();
        polls.sort_by_key(|p| Reverse(p.created_at.map(|c| c.at(utc))));
        Ok(polls)
    }

    async fn list_applications(&self, event_id: &str) -> Result<Vec<Application>, StoreError> {
        let mut rows: Vec<Application> = self
            .lock()
            .applications
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.applied_at);
        Ok(rows)
    }

    async fn insert_application(&self, application: &NewApplication) -> Result<(), StoreError> {
        let mut tables = self.lock();
        if let Some(message) = &tables.insert_failure {
            return Err(StoreError::Backend { status: 400, message: message.clone() });
        }

        let now = Utc::now();
        let applied_at = match tables.last_applied_at {
            Some(last) if last >= now => last + TimeDelta::microseconds(1),
            _ => now,
        };
        tables.next_id += 1;
        let id = tables.next_id.to_string();
        let row = application.to_row();

        tables.applications.push(Application {
            id,
            event_id: row.event_id.to_string(),
            user_name: row.user_name.to_string(),
            category: row.user_type.to_string().into(),
            participation_type: Some(row.participation_type),
            lesson_choice: row.lesson_choice,
            afterparty_join: row.afterparty_join,
            applied_at,
        });
        tables.last_applied_at = Some(applied_at);
        Ok(())
    }
}
