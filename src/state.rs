use crate::{
    auth::IdentityProvider,
    config::Config,
    services::session::SessionStore,
    store::ConsoleData,
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<ConsoleData>>,
    pub sessions: SessionStore,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        data: ConsoleData,
        sessions: SessionStore,
        identity: Arc<dyn IdentityProvider>,
        config: Config,
    ) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            sessions,
            identity,
            config: Arc::new(config),
        }
    }
}
