use serde::{Deserialize, Serialize};

/// The user shape the room service embeds in room payloads (owner and
/// member lists). The service serializes these fields in PascalCase.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl UserSummary {

    /// Display fallback for member rows with a blank or whitespace name.
    pub fn display_name(&self) -> &str {
        let trimmed = self.username.trim();
        if trimmed.is_empty() { "Member" } else { trimmed }
    }
}
