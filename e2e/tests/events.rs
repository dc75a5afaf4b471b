use std::time::Duration;

use friends_common::{
    EventPayload, EventType, FriendDirection, FriendEvent, FriendStatus, RemovalReason,
};
use friends_e2e::utils::{
    client::{websocket_url, EventStream, FriendsClient},
    server::{in_memory_config, TestServerConfig},
};
use friends_server::{managers::ConnectionManager, server::FriendsConfig, state::InMemoryStateType};
use rstest::rstest;
use tokio::time::{sleep, timeout};

const TIMEOUT_SECS: u64 = 60;
const QUIET_WINDOW: Duration = Duration::from_millis(300);

fn assert_update(event: &FriendEvent, status: FriendStatus, direction: FriendDirection) {
    assert_eq!(event.kind(), EventType::FriendUpdate);
    let EventPayload::FriendUpdate(update) = event.payload() else {
        panic!("Expected a friend update, got {event:?}");
    };
    assert_eq!(update.status, status);
    assert_eq!(update.direction, direction);
}

fn assert_removal(event: &FriendEvent) {
    assert_eq!(event.kind(), EventType::FriendRemoval);
    let EventPayload::FriendRemoval(removal) = event.payload() else {
        panic!("Expected a friend removal, got {event:?}");
    };
    assert_eq!(removal.reason, RemovalReason::Deleted);
}

#[rstest]
#[tokio::test]
async fn friendship_events(in_memory_config: FriendsConfig<InMemoryStateType>) {
    timeout(Duration::from_secs(TIMEOUT_SECS), async {
        let mut server = in_memory_config.start().await;
        server.ready().await;
        let client = FriendsClient::new(server.address());
        let alice = client.new_account().await;
        let bob = client.new_account().await;

        let mut alice_events = EventStream::connect(server.address(), &alice).await;
        let mut bob_events = EventStream::connect(server.address(), &bob).await;
        server.wait_for_sessions(&alice, 1).await;
        server.wait_for_sessions(&bob, 1).await;

        client.add_friend(&alice, &bob).await;
        let event = alice_events.next_event().await;
        assert_update(&event, FriendStatus::Pending, FriendDirection::Outbound);
        assert_eq!(event.counterpart(), &bob);
        let event = bob_events.next_event().await;
        assert_update(&event, FriendStatus::Pending, FriendDirection::Inbound);
        assert_eq!(event.counterpart(), &alice);

        client.accept(&bob, &alice).await;
        let event = alice_events.next_event().await;
        assert_update(&event, FriendStatus::Accepted, FriendDirection::Outbound);
        assert_eq!(event.counterpart(), &bob);
        let event = bob_events.next_event().await;
        assert_update(&event, FriendStatus::Accepted, FriendDirection::Outbound);
        assert_eq!(event.counterpart(), &alice);

        client.delete(&bob, &alice).await;
        let event = alice_events.next_event().await;
        assert_removal(&event);
        assert_eq!(event.counterpart(), &bob);
        let event = bob_events.next_event().await;
        assert_removal(&event);
        assert_eq!(event.counterpart(), &alice);

        // A delete with nothing left to remove stays silent.
        client.delete(&bob, &alice).await;
        alice_events.assert_silent(QUIET_WINDOW).await;
        bob_events.assert_silent(QUIET_WINDOW).await;
    })
    .await
    .expect("Test took to long to complete")
}

#[rstest]
#[tokio::test]
async fn block_emits_removal_only(in_memory_config: FriendsConfig<InMemoryStateType>) {
    timeout(Duration::from_secs(TIMEOUT_SECS), async {
        let mut server = in_memory_config.start().await;
        server.ready().await;
        let client = FriendsClient::new(server.address());
        let alice = client.new_account().await;
        let bob = client.new_account().await;
        let carol = client.new_account().await;

        let mut alice_events = EventStream::connect(server.address(), &alice).await;
        let mut carol_events = EventStream::connect(server.address(), &carol).await;
        server.wait_for_sessions(&alice, 1).await;
        server.wait_for_sessions(&carol, 1).await;

        client.add_friend(&alice, &bob).await;
        alice_events.next_event().await;

        client.block(&alice, &bob).await;
        assert_removal(&alice_events.next_event().await);
        alice_events.assert_silent(QUIET_WINDOW).await;

        // Blocking a stranger changes no relationship anyone can observe.
        client.block(&carol, &alice).await;
        carol_events.assert_silent(QUIET_WINDOW).await;
        alice_events.assert_silent(QUIET_WINDOW).await;
    })
    .await
    .expect("Test took to long to complete")
}

#[rstest]
#[tokio::test]
async fn every_session_receives_events(in_memory_config: FriendsConfig<InMemoryStateType>) {
    timeout(Duration::from_secs(TIMEOUT_SECS), async {
        let mut server = in_memory_config.start().await;
        server.ready().await;
        let client = FriendsClient::new(server.address());
        let alice = client.new_account().await;
        let bob = client.new_account().await;

        let mut phone = EventStream::connect(server.address(), &bob).await;
        let mut desktop = EventStream::connect(server.address(), &bob).await;
        server.wait_for_sessions(&bob, 2).await;

        client.add_friend(&alice, &bob).await;
        assert_update(
            &phone.next_event().await,
            FriendStatus::Pending,
            FriendDirection::Inbound,
        );
        assert_update(
            &desktop.next_event().await,
            FriendStatus::Pending,
            FriendDirection::Inbound,
        );
    })
    .await
    .expect("Test took to long to complete")
}

#[rstest]
#[tokio::test]
async fn closed_session_is_unregistered(in_memory_config: FriendsConfig<InMemoryStateType>) {
    timeout(Duration::from_secs(TIMEOUT_SECS), async {
        let mut server = in_memory_config.start().await;
        server.ready().await;
        let client = FriendsClient::new(server.address());
        let alice = client.new_account().await;
        let bob = client.new_account().await;

        let events = EventStream::connect(server.address(), &bob).await;
        server.wait_for_sessions(&bob, 1).await;
        events.close().await;
        while server.state().connections.session_count(&bob).await > 0 {
            sleep(Duration::from_millis(20)).await;
        }

        // Nobody is listening; the transition still goes through.
        let res = client.add_friend(&alice, &bob).await;
        assert!(res.status().is_success());
        assert_eq!(client.summary(&bob).await.incoming().len(), 1);
    })
    .await
    .expect("Test took to long to complete")
}

#[rstest]
#[tokio::test]
async fn unknown_account_cannot_subscribe(in_memory_config: FriendsConfig<InMemoryStateType>) {
    timeout(Duration::from_secs(TIMEOUT_SECS), async {
        let mut server = in_memory_config.start().await;
        server.ready().await;
        let ghost = friends_common::AccountId::generate();

        let res = tokio_tungstenite::connect_async(websocket_url(server.address(), &ghost)).await;
        assert!(res.is_err());
    })
    .await
    .expect("Test took to long to complete")
}
