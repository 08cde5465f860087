use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `/join` and `/leave`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyRoomRequest {
    pub room_id: String,
    pub user: LobbyUser,
}

/// A player as sent by the client. Everything besides `id` is carried
/// through to the store untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyUser {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LobbyRoomRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl LobbyUser {
    /// The record written under the player's node.
    pub fn to_record(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Joined,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyRoomResponse {
    pub room_id: String,
    pub player_id: String,
    pub status: MembershipStatus,
}

impl LobbyRoomResponse {
    pub fn new(request: &LobbyRoomRequest, status: MembershipStatus) -> Self {
        Self {
            room_id: request.room_id.clone(),
            player_id: request.user.id.clone(),
            status,
        }
    }
}
