use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::Config;
use crate::registration::{InFlightGuard, SignupPolicy};
use crate::store::SignupStore;

/// Source of "now" for gate checks and calendar defaults.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared per-process state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn SignupStore>,
    pub policy: SignupPolicy,
    pub guard: InFlightGuard,
    pub app_name: String,
    clock: Clock,
}

impl AppState {
    pub fn new(store: Arc<dyn SignupStore>, config: &Config) -> Self {
        Self {
            store,
            policy: SignupPolicy {
                guest_password: config.guest_password.clone(),
                utc_offset: config.utc_offset,
            },
            guard: InFlightGuard::new(),
            app_name: config.app_name.clone(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock, e.g. to pin a registration window in tests.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn offset(&self) -> FixedOffset {
        self.policy.utc_offset
    }
}
