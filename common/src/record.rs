use bon::Builder;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// One entry in a relationship list: the counterpart and when the entry was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEntry {
    pub account_id: AccountId,
    pub created: DateTime<Utc>,
}

impl FriendEntry {
    pub fn new(account_id: AccountId, created: DateTime<Utc>) -> Self {
        Self {
            account_id,
            created,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RelationshipList {
    Incoming,
    Outgoing,
    Accepted,
    Blocked,
}

impl RelationshipList {
    /// Lists a delete clears. Blocks are never lifted.
    pub const REVOCABLE: [RelationshipList; 3] = [
        RelationshipList::Incoming,
        RelationshipList::Outgoing,
        RelationshipList::Accepted,
    ];
}

/// The relationship lists of a single account.
///
/// Every transition replaces the whole record, so the record is the unit the
/// stores read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    #[builder(into)]
    account_id: AccountId,
    #[serde(default)]
    #[builder(default)]
    incoming: Vec<FriendEntry>,
    #[serde(default)]
    #[builder(default)]
    outgoing: Vec<FriendEntry>,
    #[serde(default)]
    #[builder(default)]
    accepted: Vec<FriendEntry>,
    #[serde(default)]
    #[builder(default)]
    blocked: Vec<FriendEntry>,
}

impl RelationshipRecord {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            accepted: Vec::new(),
            blocked: Vec::new(),
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn incoming(&self) -> &[FriendEntry] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[FriendEntry] {
        &self.outgoing
    }

    pub fn accepted(&self) -> &[FriendEntry] {
        &self.accepted
    }

    pub fn blocked(&self) -> &[FriendEntry] {
        &self.blocked
    }

    pub fn list(&self, list: RelationshipList) -> &[FriendEntry] {
        match list {
            RelationshipList::Incoming => &self.incoming,
            RelationshipList::Outgoing => &self.outgoing,
            RelationshipList::Accepted => &self.accepted,
            RelationshipList::Blocked => &self.blocked,
        }
    }

    fn list_mut(&mut self, list: RelationshipList) -> &mut Vec<FriendEntry> {
        match list {
            RelationshipList::Incoming => &mut self.incoming,
            RelationshipList::Outgoing => &mut self.outgoing,
            RelationshipList::Accepted => &mut self.accepted,
            RelationshipList::Blocked => &mut self.blocked,
        }
    }

    pub fn entry(&self, list: RelationshipList, account_id: &AccountId) -> Option<&FriendEntry> {
        self.list(list)
            .iter()
            .find(|entry| &entry.account_id == account_id)
    }

    pub fn contains(&self, list: RelationshipList, account_id: &AccountId) -> bool {
        self.entry(list, account_id).is_some()
    }

    pub fn push(&mut self, list: RelationshipList, account_id: AccountId, created: DateTime<Utc>) {
        self.list_mut(list)
            .push(FriendEntry::new(account_id, created));
    }

    pub fn remove(&mut self, list: RelationshipList, account_id: &AccountId) -> Option<FriendEntry> {
        let entries = self.list_mut(list);
        let index = entries
            .iter()
            .position(|entry| &entry.account_id == account_id)?;
        Some(entries.remove(index))
    }

    /// Drops `account_id` from every list except `blocked`.
    /// Returns whether anything was removed.
    pub fn revoke(&mut self, account_id: &AccountId) -> bool {
        let mut removed = false;
        for list in RelationshipList::REVOCABLE {
            while self.remove(list, account_id).is_some() {
                removed = true;
            }
        }
        removed
    }
}
