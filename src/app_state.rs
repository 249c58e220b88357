use std::sync::Arc;

use crate::config;
use crate::db::{SchedulingStore, SessionStore};
use crate::i18n::Localizer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchedulingStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub env: config::Config,
    pub localizer: Arc<Localizer>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SchedulingStore>,
        sessions: Arc<dyn SessionStore>,
        env: config::Config,
        localizer: Arc<Localizer>,
    ) -> Self {
        Self {
            store,
            sessions,
            env,
            localizer,
        }
    }
}
