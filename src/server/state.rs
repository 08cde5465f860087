use super::StatusPage;
use crate::store::RemoteStore;
use std::sync::Arc;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RemoteStore>,
    status_page: Arc<StatusPage>,
}

impl AppState {
    pub fn new(store: Arc<dyn RemoteStore>, status_page: StatusPage) -> Self {
        Self {
            store,
            status_page: Arc::new(status_page),
        }
    }

    pub fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }

    pub fn status_page(&self) -> &StatusPage {
        &self.status_page
    }
}
