//! Session identifier store

use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the session identifier issued by the assistant service.
///
/// The identifier is opaque: it is never parsed or validated, only
/// forwarded on the next request. Cloning a store yields another handle to
/// the same value, so a store can be injected into a controller while the
/// caller keeps a handle for inspection.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    id: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    /// Create an empty store ("no session yet")
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that resumes an existing session
    pub fn with_id(id: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(id);
        store
    }

    /// Last known session identifier
    pub fn get(&self) -> Option<String> {
        self.id.read().clone()
    }

    /// Overwrite the session identifier
    pub fn set(&self, id: impl Into<String>) {
        *self.id.write() = Some(id.into());
    }

    /// Whether a session identifier has been received yet
    pub fn is_empty(&self) -> bool {
        self.id.read().is_none()
    }
}
