use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type Key = (String, String);

/// Blocks a second sign-up for the same event and name while the first is
/// still waiting on the backend.
#[derive(Clone, Default)]
pub struct InFlightGuard {
    pending: Arc<Mutex<HashSet<Key>>>,
}

/// Held for the duration of one submission; releases its key on drop.
pub struct InFlightTicket {
    pending: Arc<Mutex<HashSet<Key>>>,
    key: Key,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if a submission with this key is already pending.
    pub fn try_acquire(&self, event_id: &str, user_name: &str) -> Option<InFlightTicket> {
        let key = (event_id.to_string(), normalize(user_name));
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.insert(key.clone()) {
            return None;
        }
        Some(InFlightTicket { pending: Arc::clone(&self.pending), key })
    }

    pub fn is_pending(&self, event_id: &str, user_name: &str) -> bool {
        let key = (event_id.to_string(), normalize(user_name));
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.contains(&key)
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.remove(&self.key);
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
