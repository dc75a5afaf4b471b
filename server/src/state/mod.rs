use crate::{
    logic::AccountLocks,
    managers::{ConnectionManager, RelationshipStore},
};

mod in_mem;
mod postgres;

pub use in_mem::InMemoryStateType;
pub use postgres::PostgresStateType;

pub trait StateType: 'static + Clone + Send + Sync {
    type RelationshipStore: RelationshipStore;
    type ConnectionManager: ConnectionManager;
}

#[derive(Clone)]
pub struct FriendsState<T: StateType> {
    pub relationships: T::RelationshipStore,
    pub connections: T::ConnectionManager,
    pub locks: AccountLocks,
}

impl<T: StateType> FriendsState<T> {
    pub fn new(relationships: T::RelationshipStore, connections: T::ConnectionManager) -> Self {
        Self {
            relationships,
            connections,
            locks: AccountLocks::default(),
        }
    }
}
