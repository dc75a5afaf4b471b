pub mod error;
mod locks;
pub mod relationships;
pub mod validate;

pub use error::RelationshipError;
pub use locks::{AccountLocks, PairGuard};
pub use relationships::TransitionOutcome;
pub use validate::TransitionRejection;
