use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::models::domain::SessionProgression;

/// In-memory map from session-cookie value to that session's progression.
/// Each entry carries its own mutex so mutation within one session is
/// serialized while unrelated sessions proceed in parallel. Entries live
/// for the process lifetime; score persistence is out of scope.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionProgression>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<Mutex<SessionProgression>>> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Inserts `progression` under `session_id` unless an entry already
    /// exists, and returns the entry either way, so racing requests for the
    /// same fresh session converge on one progression.
    pub fn insert(
        &self,
        session_id: &str,
        progression: SessionProgression,
    ) -> Arc<Mutex<SessionProgression>> {
        let mut sessions = self.sessions.write();
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(progression))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_sessions() {
        let store = SessionStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn insert_then_get_returns_the_same_entry() {
        let store = SessionStore::new();
        let inserted = store.insert("sid-1", SessionProgression::new("a.csv", 2, false));
        let fetched = store.get("sid-1").unwrap();

        assert!(Arc::ptr_eq(&inserted, &fetched));
    }

    #[test]
    fn racing_inserts_converge_on_the_first_entry() {
        let store = SessionStore::new();
        let first = store.insert("sid-1", SessionProgression::new("a.csv", 2, false));
        let second = store.insert("sid-1", SessionProgression::new("b.csv", 9, false));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.lock().bank_key(), "a.csv");
    }
}
