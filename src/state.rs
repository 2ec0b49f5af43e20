use std::sync::Arc;

use crate::auth::SessionProvider;
use crate::config::AppConfig;
use crate::database::AdminRepository;

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AdminRepository>,
    pub sessions: Arc<dyn SessionProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn AdminRepository>,
        sessions: Arc<dyn SessionProvider>,
        config: AppConfig,
    ) -> Self {
        Self {
            repository,
            sessions,
            config: Arc::new(config),
        }
    }
}
