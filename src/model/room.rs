use serde::{Deserialize, Serialize};
use crate::model::user::UserSummary;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    // the service still emits the misspelled key on older rooms
    #[serde(default, alias = "cateogery")]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserSummary>,
    #[serde(default)]
    pub members: Vec<UserSummary>,
}

impl Room {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// The client's view of its own membership in a room. Always derived from a
/// server response, never asserted locally.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JoinStatus {
    Member,
    Pending,
    None,
}

impl JoinStatus {

    pub fn to_str(&self) -> &str {
        match self {
            JoinStatus::Member => "member",
            JoinStatus::Pending => "pending",
            JoinStatus::None => "none",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JoinStatusResponse {
    pub status: JoinStatus,
}

/// Success body of the join call. The message, when present, is shown to
/// the user verbatim.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure body the service attaches to non-success statuses.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
