//! Application services handed to HTTP handlers.

use chainguard_store::TrackerStore;

/// Shared application services, injected into handlers via `Extension`.
#[derive(Debug, Default)]
pub struct AppServices {
    store: TrackerStore,
}

impl AppServices {
    pub fn new() -> Self {
        Self {
            store: TrackerStore::new(),
        }
    }

    pub fn store(&self) -> &TrackerStore {
        &self.store
    }
}
