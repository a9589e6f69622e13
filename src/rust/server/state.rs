use std::sync::Arc;
use std::time::Instant;

use crate::advisor::CropAdvisor;

/// Shared application state
///
/// Everything here is read-only once the server starts.
pub struct AppState {
    pub advisor: Arc<CropAdvisor>,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(advisor: CropAdvisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
