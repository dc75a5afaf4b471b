pub mod error;
pub mod in_mem;
pub mod postgres;
mod traits;

pub use error::RelationshipStoreError;
pub use traits::{ConnectionManager, Notifier, RelationshipStore, Session, SessionId};
