use std::num::NonZeroUsize;

use crate::managers::in_mem::{
    InMemoryConnectionManager, InMemoryRelationshipStore, DEFAULT_CHANNEL_BUFFER_SIZE,
};

use super::{FriendsState, StateType};

#[derive(Clone)]
pub struct InMemoryStateType;

impl StateType for InMemoryStateType {
    type RelationshipStore = InMemoryRelationshipStore;

    type ConnectionManager = InMemoryConnectionManager;
}

impl FriendsState<InMemoryStateType> {
    pub fn in_memory(channel_buffer_size: NonZeroUsize) -> Self {
        Self::new(
            InMemoryRelationshipStore::default(),
            InMemoryConnectionManager::new(channel_buffer_size),
        )
    }

    pub fn in_memory_test() -> Self {
        Self::in_memory(DEFAULT_CHANNEL_BUFFER_SIZE)
    }
}
