use std::num::NonZeroUsize;

use crate::managers::{
    in_mem::InMemoryConnectionManager, postgres::PostgresRelationshipStore,
    RelationshipStoreError,
};

use super::{FriendsState, StateType};

/// Records in Postgres; sessions stay in process memory.
#[derive(Clone)]
pub struct PostgresStateType;

impl StateType for PostgresStateType {
    type RelationshipStore = PostgresRelationshipStore;

    type ConnectionManager = InMemoryConnectionManager;
}

impl FriendsState<PostgresStateType> {
    pub async fn postgres(
        database_url: &str,
        channel_buffer_size: NonZeroUsize,
    ) -> Result<Self, RelationshipStoreError> {
        Ok(Self::new(
            PostgresRelationshipStore::connect(database_url).await?,
            InMemoryConnectionManager::new(channel_buffer_size),
        ))
    }
}
