use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use friends_common::{AccountId, FriendEvent};
use log::debug;
use tokio::sync::{
    mpsc::{channel, error::TrySendError, Sender},
    Mutex,
};

use crate::managers::traits::{ConnectionManager, Notifier, Session, SessionId};

pub const DEFAULT_CHANNEL_BUFFER_SIZE: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(size) => size,
    None => panic!("default channel buffer size is zero"),
};

type Sessions = HashMap<AccountId, Vec<(SessionId, Sender<FriendEvent>)>>;

/// Websocket session table. Entries live exactly as long as their session.
#[derive(Clone)]
pub struct InMemoryConnectionManager {
    sessions: Arc<Mutex<Sessions>>,
    next_id: Arc<AtomicU64>,
    channel_buffer_size: NonZeroUsize,
}

impl InMemoryConnectionManager {
    pub fn new(channel_buffer_size: NonZeroUsize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            channel_buffer_size,
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_BUFFER_SIZE)
    }
}

#[async_trait]
impl Notifier for InMemoryConnectionManager {
    async fn publish(&self, recipient: &AccountId, event: FriendEvent) {
        let mut sessions = self.sessions.lock().await;
        let Some(senders) = sessions.get_mut(recipient) else {
            debug!(
                "Dropping {} for '{recipient}': no live session",
                event.kind()
            );
            return;
        };

        senders.retain(|(id, sender)| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Dropping {} for session {id} of '{recipient}': queue full", event.kind());
                true
            }
            Err(TrySendError::Closed(_)) => false,
        });

        if senders.is_empty() {
            sessions.remove(recipient);
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn connect(&mut self, account_id: AccountId) -> Session {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, events) = channel(self.channel_buffer_size.get());
        self.sessions
            .lock()
            .await
            .entry(account_id)
            .or_default()
            .push((id, tx));
        Session { id, events }
    }

    async fn disconnect(&mut self, account_id: &AccountId, session_id: SessionId) {
        let mut sessions = self.sessions.lock().await;
        if let Some(senders) = sessions.get_mut(account_id) {
            senders.retain(|(id, _)| *id != session_id);
            if senders.is_empty() {
                sessions.remove(account_id);
            }
        }
    }

    async fn session_count(&self, account_id: &AccountId) -> usize {
        self.sessions
            .lock()
            .await
            .get(account_id)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroUsize;

    use friends_common::{AccountId, FriendEvent, FriendRemoval};

    use crate::managers::{
        in_mem::InMemoryConnectionManager,
        traits::{ConnectionManager, Notifier},
    };

    fn removal(of: &AccountId) -> FriendEvent {
        FriendEvent::removal(FriendRemoval::deleted(of.clone()))
    }

    #[tokio::test]
    async fn publish_without_session_is_dropped() {
        let mut connections = InMemoryConnectionManager::default();
        let alice = AccountId::generate();
        let bob = AccountId::generate();

        connections.publish(&alice, removal(&bob)).await;

        // Connecting afterwards does not replay anything.
        let mut session = connections.connect(alice.clone()).await;
        assert!(session.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_reaches_every_session() {
        let mut connections = InMemoryConnectionManager::default();
        let alice = AccountId::generate();
        let bob = AccountId::generate();

        let mut phone = connections.connect(alice.clone()).await;
        let mut desktop = connections.connect(alice.clone()).await;
        assert_ne!(phone.id, desktop.id);
        assert_eq!(connections.session_count(&alice).await, 2);

        connections.publish(&alice, removal(&bob)).await;

        for session in [&mut phone, &mut desktop] {
            let event = session.events.try_recv().expect("Session got the event");
            assert_eq!(event.counterpart(), &bob);
        }
    }

    #[tokio::test]
    async fn full_queue_drops_event() {
        let mut connections = InMemoryConnectionManager::new(NonZeroUsize::MIN);
        let alice = AccountId::generate();
        let bob = AccountId::generate();
        let carol = AccountId::generate();

        let mut session = connections.connect(alice.clone()).await;
        connections.publish(&alice, removal(&bob)).await;
        connections.publish(&alice, removal(&carol)).await;

        let event = session.events.try_recv().expect("First event queued");
        assert_eq!(event.counterpart(), &bob);
        assert!(session.events.try_recv().is_err());
        assert_eq!(connections.session_count(&alice).await, 1);
    }

    #[tokio::test]
    async fn closed_sessions_are_pruned() {
        let mut connections = InMemoryConnectionManager::default();
        let alice = AccountId::generate();

        let session = connections.connect(alice.clone()).await;
        drop(session);
        connections
            .publish(&alice, removal(&AccountId::generate()))
            .await;

        assert_eq!(connections.session_count(&alice).await, 0);
    }

    #[tokio::test]
    async fn disconnect_removes_only_that_session() {
        let mut connections = InMemoryConnectionManager::default();
        let alice = AccountId::generate();

        let first = connections.connect(alice.clone()).await;
        let _second = connections.connect(alice.clone()).await;
        connections.disconnect(&alice, first.id).await;

        assert_eq!(connections.session_count(&alice).await, 1);
    }
}
