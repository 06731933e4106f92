//! Address-bar and router abstraction.

use std::sync::Mutex;

use reqwest::Url;

/// What a page can do to the location it is displayed at.
pub trait Navigator: Send + Sync {
    fn current_url(&self) -> Url;

    /// Rewrites the current history entry in place.
    fn replace_url(&self, url: Url);

    /// Navigates to `path` (resolved against the current URL), adding a
    /// history entry.
    fn push(&self, path: &str);
}

#[derive(Debug)]
struct NavState {
    current: Url,
    back: Vec<Url>,
}

/// In-memory navigator that records history, for the CLI and tests.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<NavState>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(start: Url) -> Self {
        Self {
            state: Mutex::new(NavState {
                current: start,
                back: Vec::new(),
            }),
        }
    }

    /// Number of history entries. `replace_url` leaves this unchanged.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.with_state(|s| s.back.len() + 1)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut NavState) -> T) -> T {
        // A panic while holding this lock cannot leave the history half
        // written, so a poisoned lock is still usable.
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Navigator for MemoryNavigator {
    fn current_url(&self) -> Url {
        self.with_state(|s| s.current.clone())
    }

    fn replace_url(&self, url: Url) {
        self.with_state(|s| s.current = url);
    }

    fn push(&self, path: &str) {
        self.with_state(|s| match s.current.join(path) {
            Ok(next) => {
                let previous = std::mem::replace(&mut s.current, next);
                s.back.push(previous);
            }
            Err(e) => tracing::warn!(path, error = %e, "ignoring navigation to invalid path"),
        });
    }
}
