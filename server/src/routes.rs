use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use friends_common::{AccountId, RelationshipRecord};
use log::info;

use crate::{
    error::ServerError,
    logic::relationships,
    socket::serve_session,
    state::{FriendsState, StateType},
};

pub async fn register_endpoint<T: StateType>(
    State(mut state): State<FriendsState<T>>,
    Path(account_id): Path<AccountId>,
) -> Result<StatusCode, ServerError> {
    relationships::register(&mut state, &account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary_endpoint<T: StateType>(
    State(state): State<FriendsState<T>>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<RelationshipRecord>, ServerError> {
    Ok(Json(relationships::summary(&state, &account_id).await?))
}

pub async fn add_friend_endpoint<T: StateType>(
    State(mut state): State<FriendsState<T>>,
    Path((account_id, friend_id)): Path<(AccountId, AccountId)>,
) -> Result<StatusCode, ServerError> {
    relationships::add_friend(&mut state, &account_id, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn accept_endpoint<T: StateType>(
    State(mut state): State<FriendsState<T>>,
    Path((account_id, friend_id)): Path<(AccountId, AccountId)>,
) -> Result<StatusCode, ServerError> {
    relationships::accept_request(&mut state, &account_id, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_friend_endpoint<T: StateType>(
    State(mut state): State<FriendsState<T>>,
    Path((account_id, friend_id)): Path<(AccountId, AccountId)>,
) -> Result<StatusCode, ServerError> {
    relationships::delete_relationship(&mut state, &account_id, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn block_endpoint<T: StateType>(
    State(mut state): State<FriendsState<T>>,
    Path((account_id, friend_id)): Path<(AccountId, AccountId)>,
) -> Result<StatusCode, ServerError> {
    relationships::block_account(&mut state, &account_id, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn websocket_endpoint<T: StateType>(
    State(state): State<FriendsState<T>>,
    Path(account_id): Path<AccountId>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ServerError> {
    relationships::summary(&state, &account_id).await?;

    Ok(ws.on_upgrade(move |socket| async move {
        info!("'{account_id}' connected");
        serve_session(state, socket, account_id).await
    }))
}
