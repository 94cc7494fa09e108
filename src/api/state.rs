use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::data_store::TabularDataStore;
use crate::session::SessionRegistry;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<TabularDataStore>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = TabularDataStore::from_config(&config);
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: TabularDataStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
