use std::sync::Arc;

use crate::{
    config::Config, repositories::CsvBankRegistry, services::SessionService,
    session_store::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(CsvBankRegistry::new(config.data_dir.clone()));
        let session_service = Arc::new(SessionService::new(registry, config.randomize_order));

        Self {
            session_service,
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_from_test_config() {
        let state = AppState::new(Config::test_config());
        let sources = state.session_service.list_sources().unwrap();
        assert!(!sources.is_empty());
    }
}
