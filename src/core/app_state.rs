use std::sync::Arc;
use crate::api::RoomServiceApi;
use crate::core::RbcConfig;
use crate::notify::NoticeSender;
use crate::storage::LocalStore;

/// Shared handles every room card needs: the remote service, the local
/// storage file and the notice channel the frontend renders from.
#[derive(Clone)]
pub struct AppState {
    pub env: RbcConfig,
    pub api: RoomServiceApi,
    pub storage: Arc<LocalStore>,
    pub notices: NoticeSender,
}
