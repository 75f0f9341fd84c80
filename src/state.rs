//! Application state shared by all handlers.

use std::sync::{Arc, Mutex};

use crate::paths::DataPaths;
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Locations of the credential store and the three datasets
    pub paths: DataPaths,

    /// Logged-in sessions, keyed by cookie token
    pub sessions: SessionStore,

    /// Held while an upload is written and renamed into place
    pub dataset_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(paths: DataPaths, sessions: SessionStore) -> Self {
        Self {
            paths,
            sessions,
            dataset_lock: Arc::new(Mutex::new(())),
        }
    }
}
