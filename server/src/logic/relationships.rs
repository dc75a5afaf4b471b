use chrono::{DateTime, Utc};
use friends_common::{
    AccountId, FriendDirection, FriendEvent, FriendRemoval, FriendStatus, FriendUpdate,
    RelationshipList, RelationshipRecord,
};
use log::{debug, error};

use crate::{
    logic::{
        error::RelationshipError,
        validate::{self, TransitionRejection},
    },
    managers::{Notifier, RelationshipStore},
    state::{FriendsState, StateType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Changed,
    Unchanged,
}

/// Creates the relationship record of a new account. Existing records are left as is.
pub async fn register<T: StateType>(
    state: &mut FriendsState<T>,
    account_id: &AccountId,
) -> Result<RelationshipRecord, RelationshipError> {
    let record = state.relationships.create(account_id).await?;
    debug!("Registered relationship record for '{account_id}'");
    Ok(record)
}

pub async fn summary<T: StateType>(
    state: &FriendsState<T>,
    account_id: &AccountId,
) -> Result<RelationshipRecord, RelationshipError> {
    Ok(state.relationships.get(account_id).await?)
}

pub async fn send_request<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let _guard = state.locks.lock_pair(actor, target).await;
    apply_send_request(state, actor, target).await
}

pub async fn accept_request<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let _guard = state.locks.lock_pair(actor, target).await;
    apply_accept_request(state, actor, target).await
}

/// Accepts a pending request from `target` if there is one, otherwise sends one.
pub async fn add_friend<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let _guard = state.locks.lock_pair(actor, target).await;
    let record = state.relationships.get(actor).await?;
    if record.contains(RelationshipList::Incoming, target) {
        apply_accept_request(state, actor, target).await
    } else {
        apply_send_request(state, actor, target).await
    }
}

pub async fn delete_relationship<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let _guard = state.locks.lock_pair(actor, target).await;
    let (mut from, mut to) = load_pair(state, actor, target).await?;
    validate::check_delete(&from, &to).map_err(|r| reject("delete", actor, target, r))?;

    let actor_removed = from.revoke(target);
    let target_removed = to.revoke(actor);
    if !actor_removed && !target_removed {
        debug!("Nothing to delete between '{actor}' and '{target}'");
        return Ok(TransitionOutcome::Unchanged);
    }

    save_pair(state, &from, &to).await?;
    debug!("'{actor}' deleted its relationship with '{target}'");
    if actor_removed {
        publish_removal(state, actor, target).await;
        publish_removal(state, target, actor).await;
    }
    Ok(TransitionOutcome::Changed)
}

/// Clears every relationship between the two accounts, then records the block.
/// The block itself produces no event; removals do.
pub async fn block_account<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let _guard = state.locks.lock_pair(actor, target).await;
    let (mut from, mut to) = load_pair(state, actor, target).await?;
    validate::check_block(&from, &to).map_err(|r| reject("block", actor, target, r))?;

    let actor_removed = from.revoke(target);
    to.revoke(actor);
    from.push(RelationshipList::Blocked, target.clone(), Utc::now());

    save_pair(state, &from, &to).await?;
    debug!("'{actor}' blocked '{target}'");
    if actor_removed {
        publish_removal(state, actor, target).await;
        publish_removal(state, target, actor).await;
    }
    Ok(TransitionOutcome::Changed)
}

async fn apply_send_request<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let (mut from, mut to) = load_pair(state, actor, target).await?;
    validate::check_add(&from, &to).map_err(|r| reject("friend request", actor, target, r))?;
    if from.contains(RelationshipList::Incoming, target) {
        return Err(reject(
            "friend request",
            actor,
            target,
            TransitionRejection::ReversePending,
        ));
    }

    let sent = from.contains(RelationshipList::Outgoing, target);
    let received = to.contains(RelationshipList::Incoming, actor);
    if sent && received {
        debug!("Friend request from '{actor}' to '{target}' is already pending");
        return Ok(TransitionOutcome::Unchanged);
    }

    let now = Utc::now();
    if !sent {
        from.push(RelationshipList::Outgoing, target.clone(), now);
    }
    if !received {
        to.push(RelationshipList::Incoming, actor.clone(), now);
    }

    save_pair(state, &from, &to).await?;
    debug!("'{actor}' sent a friend request to '{target}'");
    publish_update(
        state,
        actor,
        target,
        FriendStatus::Pending,
        FriendDirection::Outbound,
        now,
    )
    .await;
    publish_update(
        state,
        target,
        actor,
        FriendStatus::Pending,
        FriendDirection::Inbound,
        now,
    )
    .await;
    Ok(TransitionOutcome::Changed)
}

async fn apply_accept_request<T: StateType>(
    state: &mut FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<TransitionOutcome, RelationshipError> {
    let (mut from, mut to) = load_pair(state, actor, target).await?;
    // Re-checked so a block placed after the request still wins.
    validate::check_add(&from, &to).map_err(|r| reject("friend accept", actor, target, r))?;
    if from.remove(RelationshipList::Incoming, target).is_none() {
        return Err(reject(
            "friend accept",
            actor,
            target,
            TransitionRejection::NoPendingRequest,
        ));
    }
    to.remove(RelationshipList::Outgoing, actor);

    let now = Utc::now();
    from.push(RelationshipList::Accepted, target.clone(), now);
    to.push(RelationshipList::Accepted, actor.clone(), now);

    save_pair(state, &from, &to).await?;
    debug!("'{actor}' accepted the friend request of '{target}'");
    publish_update(
        state,
        actor,
        target,
        FriendStatus::Accepted,
        FriendDirection::Outbound,
        now,
    )
    .await;
    publish_update(
        state,
        target,
        actor,
        FriendStatus::Accepted,
        FriendDirection::Outbound,
        now,
    )
    .await;
    Ok(TransitionOutcome::Changed)
}

async fn load_pair<T: StateType>(
    state: &FriendsState<T>,
    actor: &AccountId,
    target: &AccountId,
) -> Result<(RelationshipRecord, RelationshipRecord), RelationshipError> {
    let from = state.relationships.get(actor).await?;
    let to = state.relationships.get(target).await?;
    Ok((from, to))
}

async fn save_pair<T: StateType>(
    state: &mut FriendsState<T>,
    from: &RelationshipRecord,
    to: &RelationshipRecord,
) -> Result<(), RelationshipError> {
    state
        .relationships
        .save_pair(from, to)
        .await
        .inspect_err(|e| {
            error!(
                "Failed to save relationship of '{}' and '{}': {e}",
                from.account_id(),
                to.account_id()
            )
        })?;
    Ok(())
}

fn reject(
    transition: &str,
    actor: &AccountId,
    target: &AccountId,
    rejection: TransitionRejection,
) -> RelationshipError {
    debug!("Rejected {transition} from '{actor}' to '{target}': {rejection}");
    RelationshipError::InvalidTransition(rejection)
}

async fn publish_update<T: StateType>(
    state: &FriendsState<T>,
    recipient: &AccountId,
    counterpart: &AccountId,
    status: FriendStatus,
    direction: FriendDirection,
    created: DateTime<Utc>,
) {
    let update = FriendUpdate::builder()
        .account_id(counterpart.clone())
        .status(status)
        .direction(direction)
        .created(created)
        .build();
    state
        .connections
        .publish(recipient, FriendEvent::update(update))
        .await;
}

async fn publish_removal<T: StateType>(
    state: &FriendsState<T>,
    recipient: &AccountId,
    counterpart: &AccountId,
) {
    state
        .connections
        .publish(
            recipient,
            FriendEvent::removal(FriendRemoval::deleted(counterpart.clone())),
        )
        .await;
}
