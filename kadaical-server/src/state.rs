use std::path::Path;

use kadaical_core::FeedConfig;

/// Shared application state
///
/// The schedule directory is read-only from the server's point of view,
/// so every request can hit the filesystem independently.
#[derive(Clone)]
pub struct AppState {
    config: FeedConfig,
}

impl AppState {
    pub fn new(config: FeedConfig) -> Self {
        AppState { config }
    }

    pub fn schedule_dir(&self) -> &Path {
        &self.config.schedule_dir
    }
}
