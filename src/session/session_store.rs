use std::sync::Arc;
use tracing::{error, warn};
use crate::api::RoomServiceApi;
use crate::errors::ClientError;
use crate::model::UserSummary;
use crate::storage::{LocalStore, AUTH_TOKEN_KEY, TOKEN_KEY, USER_KEY};

/// Token and user bookkeeping over the local store, plus the sign-out flow.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<LocalStore>,
    api: RoomServiceApi,
}

impl SessionStore {

    pub fn new(store: Arc<LocalStore>, api: RoomServiceApi) -> Self {
        SessionStore { store, api }
    }

    /// The bearer token, reading the newer `authToken` key first and the
    /// legacy `token` key second.
    pub fn auth_token(&self) -> Option<String> {
        self.store
            .get_json::<String>(AUTH_TOKEN_KEY)
            .or_else(|| self.store.get_json::<String>(TOKEN_KEY))
    }

    pub fn current_user(&self) -> Option<UserSummary> {
        self.store.get_json(USER_KEY)
    }

    pub fn store_session(&self, token: &str, user: &UserSummary) -> Result<(), ClientError> {
        self.store.set_json(AUTH_TOKEN_KEY, &token)?;
        self.store.set_json(USER_KEY, user)
    }

    /// Calls the logout endpoint and clears the local session keys. The
    /// server session is the authority, so the keys are cleared even when
    /// the request fails; that failure is logged only.
    pub async fn sign_out(&self) {
        match self.auth_token() {
            None => {
                warn!("No token found. User might already be logged out.");
            }
            Some(_) => {
                if let Err(err) = self.api.logout().await {
                    error!("Logout failed: {err}");
                }
            }
        }

        for key in [TOKEN_KEY, AUTH_TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove_item(key) {
                error!("Failed to clear '{key}' from local storage: {err}");
            }
        }
    }
}
