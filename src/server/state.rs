//! Application state shared across HTTP handlers

use crate::auth::{AccessControl, PermissionFacade};
use crate::config::Config;
use crate::server::middleware::SessionResolver;
use crate::storage::MemoryStore;
use std::sync::Arc;

/// HTTP server state shared across handlers.
///
/// All fields are behind `Arc` for cheap sharing across workers. The access
/// control root and its facade are the single source of authorization
/// truth for both the route gates and the UI-facing permission queries.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (read-only after startup)
    pub config: Arc<Config>,
    /// Access-control root
    pub access: Arc<AccessControl>,
    /// Memoized permission queries for UI payloads
    pub facade: Arc<PermissionFacade>,
    /// Storage layer
    pub store: Arc<MemoryStore>,
    /// Session collaborator resolving principals from requests
    pub session: Arc<dyn SessionResolver>,
}

impl AppState {
    /// Assemble the shared state.
    pub fn new(
        config: Config,
        access: AccessControl,
        store: MemoryStore,
        session: Arc<dyn SessionResolver>,
    ) -> Self {
        let access = Arc::new(access);
        let facade = Arc::new(PermissionFacade::new(access.clone()));
        Self {
            config: Arc::new(config),
            access,
            facade,
            store: Arc::new(store),
            session,
        }
    }
}
