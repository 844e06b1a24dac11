use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use tracing::debug;
use typed_builder::TypedBuilder;
use url::Url;
use crate::core::RbcConfig;
use crate::errors::{ApiSnafu, ClientError, HttpSnafu, RoomNotFoundSnafu, UrlParseSnafu};
use crate::model::{ActionResponse, ApiErrorBody, JoinStatus, JoinStatusResponse};

/// Thin client over the room service's REST surface. One instance is shared
/// by every card; it owns nothing but the connection pool and the token.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RoomServiceApi {
    base_url: Url,
    #[builder(default, setter(strip_option, into))]
    auth_token: Option<String>,
    #[builder(default)]
    http: Client,
}

impl RoomServiceApi {

    pub fn from_config(config: &RbcConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.server_url)
            .context(UrlParseSnafu { input: config.server_url.clone() })?;
        Ok(RoomServiceApi::builder().base_url(base_url).build())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// GET /session-room/{id}/join-status. A 404 means the room is gone and
    /// is reported as its own error variant so the poller can stop.
    pub async fn join_status(&self, room_id: &str) -> Result<JoinStatus, ClientError> {
        let url = self.endpoint(&format!("session-room/{room_id}/join-status"))?;
        let response = self.authorized(self.http.get(url)).send().await.context(HttpSnafu)?;
        if response.status() == StatusCode::NOT_FOUND {
            return RoomNotFoundSnafu { room_id }.fail();
        }
        let body: JoinStatusResponse = Self::parse_success(response).await?;
        debug!("Join status for room {room_id}: {}", body.status.to_str());
        Ok(body.status)
    }

    /// POST /session-room/{id}/join. The response message, when the service
    /// sends one, is meant for the user.
    pub async fn join(&self, room_id: &str) -> Result<ActionResponse, ClientError> {
        let response = self.post(&format!("session-room/{room_id}/join")).await?;
        Self::parse_success(response).await
    }

    pub async fn request_join(&self, room_id: &str) -> Result<(), ClientError> {
        let response = self.post(&format!("session-room/{room_id}/request-join")).await?;
        Self::expect_success(response).await.map(|_| ())
    }

    pub async fn cancel_request(&self, room_id: &str) -> Result<(), ClientError> {
        let response = self.post(&format!("session-room/{room_id}/cancel-request")).await?;
        Self::expect_success(response).await.map(|_| ())
    }

    pub async fn leave(&self, room_id: &str) -> Result<(), ClientError> {
        let response = self.post(&format!("session-room/{room_id}/leave")).await?;
        Self::expect_success(response).await.map(|_| ())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.post("logout").await?;
        Self::expect_success(response).await.map(|_| ())
    }

    async fn post(&self, path: &str) -> Result<Response, ClientError> {
        let url = self.endpoint(path)?;
        self.authorized(self.http.post(url)).send().await.context(HttpSnafu)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&joined).context(UrlParseSnafu { input: joined.clone() })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        ApiSnafu { status, message }.fail()
    }

    async fn parse_success<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::expect_success(response).await?;
        response.json::<T>().await.context(HttpSnafu)
    }
}
