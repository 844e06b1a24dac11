use std::path::PathBuf;
use http::StatusCode;
use snafu::Snafu;

/// Everything that can go wrong while talking to the room service or
/// touching the local storage file. Callers surface these as transient
/// user notices, except `RoomNotFound`, which additionally stops the poller.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ClientError {

    #[snafu(display("Request to the room service failed: {source}"))]
    Http { source: reqwest::Error },

    #[snafu(display("Room service rejected the request ({status}): {message}"))]
    Api { status: StatusCode, message: String },

    #[snafu(display("Room {room_id} does not exist on the server"))]
    RoomNotFound { room_id: String },

    #[snafu(display("Invalid room service url '{input}': {source}"))]
    UrlParse { input: String, source: url::ParseError },

    #[snafu(display("Unable to access local storage at {}: {source}", path.display()))]
    Storage { path: PathBuf, source: std::io::Error },

    #[snafu(display("Unable to encode or decode stored data: {source}"))]
    Serialization { source: serde_json::Error },
}

impl ClientError {

    /// The message shown to the user when this failure becomes a notice.
    /// A server-provided error string wins over the generic fallback.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message,
            _ => fallback,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::RoomNotFound { .. } => Some(StatusCode::NOT_FOUND),
            ClientError::Http { source } => source.status(),
            _ => None,
        }
    }
}
