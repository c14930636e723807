//! Application state shared across handlers

use std::sync::Arc;

use application::DirectionsService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directions pipeline
    pub directions: Arc<DirectionsService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from a service and the configuration it was built from
    #[must_use]
    pub fn new(directions: DirectionsService, config: AppConfig) -> Self {
        Self {
            directions: Arc::new(directions),
            config: Arc::new(config),
        }
    }
}
