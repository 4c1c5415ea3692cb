use std::path::PathBuf;

use super::Config;

/// Shared state handed to every connection task.
pub struct AppState {
    pub config: Config,
    /// Canonicalized directory every served path must stay inside.
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
