mod connections;
mod relationship_store;

pub use connections::{InMemoryConnectionManager, DEFAULT_CHANNEL_BUFFER_SIZE};
pub use relationship_store::InMemoryRelationshipStore;
