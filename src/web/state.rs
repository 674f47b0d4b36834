use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::engine::MacroDataService;

/// Combined application state for the web server
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MacroDataService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<MacroDataService>) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}
