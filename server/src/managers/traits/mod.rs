mod notifier;
mod relationship_store;

pub use notifier::{ConnectionManager, Notifier, Session, SessionId};
pub use relationship_store::RelationshipStore;
