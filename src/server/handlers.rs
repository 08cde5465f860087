use super::{ApiError, AppState};
use crate::model::{player_path, LobbyRoomRequest, LobbyRoomResponse, MembershipStatus};
use crate::store::StoreError;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use tracing::{info, instrument};

#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = state.status_page().render()?;
    Ok(Html(page))
}

/// Writes the user record under `lobby/private/<roomId>/players/<user.id>`.
#[instrument(skip(state, body))]
pub async fn join(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LobbyRoomResponse>, ApiError> {
    let request = LobbyRoomRequest::from_slice(&body)?;
    let path = player_path(&request.room_id, &request.user.id)?;
    let record = request.user.to_record().map_err(StoreError::from)?;

    state.store().set_value(&path, &record).await?;

    info!(room_id = %request.room_id, player_id = %request.user.id, "Player joined room");
    Ok(Json(LobbyRoomResponse::new(&request, MembershipStatus::Joined)))
}

/// Deletes the player's node. Leaving a room the player never joined succeeds.
#[instrument(skip(state, body))]
pub async fn leave(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LobbyRoomResponse>, ApiError> {
    let request = LobbyRoomRequest::from_slice(&body)?;
    let path = player_path(&request.room_id, &request.user.id)?;

    state.store().delete_value(&path).await?;

    info!(room_id = %request.room_id, player_id = %request.user.id, "Player left room");
    Ok(Json(LobbyRoomResponse::new(&request, MembershipStatus::Left)))
}
