// Application state (AppState)

use crate::core::config::Config;
use crate::security::credentials::CredentialRegistry;
use crate::services::user_service::UserService;
use crate::stores::user_store::UserStore;
use std::sync::Arc;

/// Shared application state
///
/// Immutable after startup; the connection pool inside the store is the only
/// resource shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// User business operations
    pub users: Arc<UserService>,

    /// Bearer token to role resolution
    pub credentials: Arc<CredentialRegistry>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: UserStore) -> Self {
        let config = Arc::new(config);

        let credentials = Arc::new(CredentialRegistry::from_config(&config.auth.credentials));

        Self {
            users: Arc::new(UserService::new(store)),
            credentials,
            config,
        }
    }
}
