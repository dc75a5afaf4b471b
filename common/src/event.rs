use bon::Builder;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendStatus {
    Pending,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendDirection {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RemovalReason {
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct FriendUpdate {
    pub account_id: AccountId,
    pub status: FriendStatus,
    pub direction: FriendDirection,
    #[builder(default = Utc::now())]
    pub created: DateTime<Utc>,
    #[builder(default)]
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRemoval {
    pub account_id: AccountId,
    pub reason: RemovalReason,
}

impl FriendRemoval {
    pub fn deleted(account_id: AccountId) -> Self {
        Self {
            account_id,
            reason: RemovalReason::Deleted,
        }
    }
}

/// Wire names of the event types, as existing real-time clients parse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "com.epicgames.friends.core.apiobjects.Friend")]
    FriendUpdate,
    #[serde(rename = "com.epicgames.friends.core.apiobjects.FriendRemoval")]
    FriendRemoval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    FriendUpdate(FriendUpdate),
    FriendRemoval(FriendRemoval),
}

/// A relationship change as handed to the real-time channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEvent {
    #[serde(rename = "type")]
    kind: EventType,
    payload: EventPayload,
    timestamp: DateTime<Utc>,
}

impl FriendEvent {
    pub fn update(payload: FriendUpdate) -> Self {
        Self {
            kind: EventType::FriendUpdate,
            payload: EventPayload::FriendUpdate(payload),
            timestamp: Utc::now(),
        }
    }

    pub fn removal(payload: FriendRemoval) -> Self {
        Self {
            kind: EventType::FriendRemoval,
            payload: EventPayload::FriendRemoval(payload),
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// The account the event is about (not the one receiving it).
    pub fn counterpart(&self) -> &AccountId {
        match &self.payload {
            EventPayload::FriendUpdate(update) => &update.account_id,
            EventPayload::FriendRemoval(removal) => &removal.account_id,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod test {
    use serde_json::Value;

    use crate::{
        AccountId, EventPayload, EventType, FriendDirection, FriendEvent, FriendRemoval,
        FriendStatus, FriendUpdate,
    };

    #[test]
    fn update_wire_shape() {
        let event = FriendEvent::update(
            FriendUpdate::builder()
                .account_id(AccountId::from("bob"))
                .status(FriendStatus::Pending)
                .direction(FriendDirection::Inbound)
                .build(),
        );
        let value: Value =
            serde_json::from_str(&event.encode().expect("Can encode")).expect("Valid json");

        assert_eq!(value["type"], "com.epicgames.friends.core.apiobjects.Friend");
        assert_eq!(value["payload"]["accountId"], "bob");
        assert_eq!(value["payload"]["status"], "PENDING");
        assert_eq!(value["payload"]["direction"], "INBOUND");
        assert_eq!(value["payload"]["favorite"], false);
        assert!(value["payload"]["created"].is_string());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn removal_wire_shape() {
        let event = FriendEvent::removal(FriendRemoval::deleted(AccountId::from("bob")));
        let value: Value =
            serde_json::from_str(&event.encode().expect("Can encode")).expect("Valid json");

        assert_eq!(
            value["type"],
            "com.epicgames.friends.core.apiobjects.FriendRemoval"
        );
        assert_eq!(value["payload"]["accountId"], "bob");
        assert_eq!(value["payload"]["reason"], "DELETED");
    }

    #[test]
    fn decode_keeps_payload_kind() {
        let event = FriendEvent::removal(FriendRemoval::deleted(AccountId::from("bob")));
        let decoded =
            FriendEvent::decode(&event.encode().expect("Can encode")).expect("Can decode");

        assert_eq!(decoded.kind(), EventType::FriendRemoval);
        assert!(matches!(decoded.payload(), EventPayload::FriendRemoval(_)));
        assert_eq!(decoded, event);
    }
}
