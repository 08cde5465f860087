mod lobby_path;
mod lobby_request;

pub use lobby_path::{player_path, players_path};
pub use lobby_request::{LobbyRoomRequest, LobbyRoomResponse, LobbyUser, MembershipStatus};
