use async_trait::async_trait;
use friends_common::{AccountId, FriendEvent};
use tokio::sync::mpsc::Receiver;

pub type SessionId = u64;

#[async_trait]
pub trait Notifier: Send + Sync + Clone + 'static {
    /// Fire-and-forget. Recipients without a live session never see the event.
    async fn publish(&self, recipient: &AccountId, event: FriendEvent);
}

/// A live real-time session: its id and the events addressed to it.
pub struct Session {
    pub id: SessionId,
    pub events: Receiver<FriendEvent>,
}

#[async_trait]
pub trait ConnectionManager: Notifier {
    async fn connect(&mut self, account_id: AccountId) -> Session;
    async fn disconnect(&mut self, account_id: &AccountId, session_id: SessionId);
    async fn session_count(&self, account_id: &AccountId) -> usize;
}
