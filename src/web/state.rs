use std::sync::Arc;

use crate::session::Session;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Session,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        AppState {
            config: Arc::new(config),
            session,
        }
    }
}
