//! Transition rules over two loaded records.
//!
//! A missing record never reaches these functions: loading the pair already
//! fails with an unknown-account error.

use derive_more::Display;
use friends_common::{RelationshipList, RelationshipRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransitionRejection {
    #[display("an account cannot reference itself")]
    SelfReference,
    #[display("accounts are already friends")]
    AlreadyFriends,
    #[display("one of the accounts has blocked the other")]
    Blocked,
    #[display("account is already blocked")]
    AlreadyBlocked,
    #[display("no pending friend request from that account")]
    NoPendingRequest,
    #[display("that account has already sent a friend request")]
    ReversePending,
}

impl TransitionRejection {
    pub fn code(&self) -> &'static str {
        match self {
            TransitionRejection::SelfReference => "self_reference",
            TransitionRejection::AlreadyFriends => "already_friends",
            TransitionRejection::Blocked => "blocked",
            TransitionRejection::AlreadyBlocked => "already_blocked",
            TransitionRejection::NoPendingRequest => "no_pending_request",
            TransitionRejection::ReversePending => "reverse_pending",
        }
    }
}

pub fn check_add(
    actor: &RelationshipRecord,
    target: &RelationshipRecord,
) -> Result<(), TransitionRejection> {
    let (actor_id, target_id) = (actor.account_id(), target.account_id());
    if actor_id == target_id {
        return Err(TransitionRejection::SelfReference);
    }
    if actor.contains(RelationshipList::Accepted, target_id)
        || target.contains(RelationshipList::Accepted, actor_id)
    {
        return Err(TransitionRejection::AlreadyFriends);
    }
    if actor.contains(RelationshipList::Blocked, target_id)
        || target.contains(RelationshipList::Blocked, actor_id)
    {
        return Err(TransitionRejection::Blocked);
    }
    Ok(())
}

/// Deleting is always allowed once both records exist.
pub fn check_delete(
    _actor: &RelationshipRecord,
    _target: &RelationshipRecord,
) -> Result<(), TransitionRejection> {
    Ok(())
}

pub fn check_block(
    actor: &RelationshipRecord,
    target: &RelationshipRecord,
) -> Result<(), TransitionRejection> {
    check_delete(actor, target)?;
    if actor.account_id() == target.account_id() {
        return Err(TransitionRejection::SelfReference);
    }
    if actor.contains(RelationshipList::Blocked, target.account_id()) {
        return Err(TransitionRejection::AlreadyBlocked);
    }
    Ok(())
}

pub fn can_add(actor: &RelationshipRecord, target: &RelationshipRecord) -> bool {
    check_add(actor, target).is_ok()
}

pub fn can_delete(actor: &RelationshipRecord, target: &RelationshipRecord) -> bool {
    check_delete(actor, target).is_ok()
}

pub fn can_block(actor: &RelationshipRecord, target: &RelationshipRecord) -> bool {
    check_block(actor, target).is_ok()
}
