use axum::extract::ws::{Message, WebSocket};
use friends_common::AccountId;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info};

use crate::{
    managers::{ConnectionManager, Session},
    state::{FriendsState, StateType},
};

/// Forwards the account's events to the socket until either side goes away.
/// Clients only listen; anything they send besides a close frame is ignored.
pub async fn serve_session<T: StateType>(
    mut state: FriendsState<T>,
    socket: WebSocket,
    account_id: AccountId,
) {
    let Session { id, mut events } = state.connections.connect(account_id.clone()).await;
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                let text = match event.encode() {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Could not encode event for '{account_id}': {e}");
                        continue;
                    }
                };
                if let Err(e) = sender.send(Message::Text(text.into())).await {
                    debug!("Session {id} of '{account_id}' stopped receiving: {e}");
                    break;
                }
            }
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!("Session {id} of '{account_id}' failed: {e}");
                    break;
                }
                Some(Ok(_)) => {}
            }
        }
    }

    state.connections.disconnect(&account_id, id).await;
    info!("'{account_id}' disconnected");
}
