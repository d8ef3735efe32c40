//! Access to the hosted table backend.
//!
//! The board never stores anything itself: events, polls and sign-ups live in
//! three remote tables. `SignupStore` is the seam; `RemoteStore` talks to the
//! real backend and `MemoryStore` stands in for it in tests.

pub mod memory;
pub mod remote;

use async_trait::async_trait;

use crate::models::{Application, Event, NewApplication, Poll};

pub use memory::MemoryStore;
pub use remote::RemoteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success response; `message` is the backend's own text.
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("unexpected response from backend: {0}")]
    Decode(String),
}

#[async_trait]
pub trait SignupStore: Send + Sync {
    /// All events, unfiltered.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// All polls, newest first.
    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError>;

    /// Sign-ups for one event, oldest first.
    async fn list_applications(&self, event_id: &str) -> Result<Vec<Application>, StoreError>;

    async fn insert_application(&self, application: &NewApplication) -> Result<(), StoreError>;
}
