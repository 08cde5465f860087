use crate::store::{InvalidKey, StorePath};

const LOBBY: &str = "lobby";
const PRIVATE: &str = "private";
const PLAYERS: &str = "players";

/// `lobby/private/<roomId>/players`
pub fn players_path(room_id: &str) -> Result<StorePath, InvalidKey> {
    StorePath::root()
        .child(LOBBY)?
        .child(PRIVATE)?
        .child(room_id)?
        .child(PLAYERS)
}

/// `lobby/private/<roomId>/players/<playerId>`
pub fn player_path(room_id: &str, player_id: &str) -> Result<StorePath, InvalidKey> {
    players_path(room_id)?.child(player_id)
}
