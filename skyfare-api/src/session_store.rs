use std::collections::HashMap;
use std::time::{Duration, Instant};
use skyfare_search::ResultsView;
use uuid::Uuid;

struct SessionEntry {
    view: ResultsView,
    last_touched: Instant,
}

/// Results views keyed by session id. A view untouched for longer than
/// `idle` is gone: lookups miss it and `cleanup_idle` drops it.
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionEntry>,
    idle: Duration,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            idle,
        }
    }

    pub fn insert(&mut self, id: Uuid, view: ResultsView, now: Instant) {
        self.sessions.insert(
            id,
            SessionEntry {
                view,
                last_touched: now,
            },
        );
    }

    /// Live view for `id`, marked as used at `now`. An idle view is removed.
    pub fn touch(&mut self, id: &Uuid, now: Instant) -> Option<&mut ResultsView> {
        let expired = match self.sessions.get(id) {
            Some(entry) => self.is_idle(entry, now),
            None => return None,
        };
        if expired {
            self.sessions.remove(id);
            return None;
        }

        let entry = self.sessions.get_mut(id)?;
        entry.last_touched = now;
        Some(&mut entry.view)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<ResultsView> {
        self.sessions.remove(id).map(|entry| entry.view)
    }

    /// Drop every idle view. Returns how many were removed.
    pub fn cleanup_idle(&mut self, now: Instant) -> usize {
        let initial_count = self.sessions.len();
        let idle = self.idle;
        self.sessions
            .retain(|_, entry| now.saturating_duration_since(entry.last_touched) <= idle);
        initial_count - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_idle(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_touched) > self.idle
    }
}
