mod account;
mod event;
mod record;

pub use account::AccountId;
pub use event::{
    EventPayload, EventType, FriendDirection, FriendEvent, FriendRemoval, FriendStatus,
    FriendUpdate, RemovalReason,
};
pub use record::{FriendEntry, RelationshipList, RelationshipRecord};
