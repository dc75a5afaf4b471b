use derive_more::{Display, Error, From};
use friends_common::AccountId;

use crate::{logic::validate::TransitionRejection, managers::RelationshipStoreError};

#[derive(Debug, Display, Error, From)]
pub enum RelationshipError {
    #[display("unknown account '{_0}'")]
    #[from(skip)]
    UnknownAccount(#[error(not(source))] AccountId),
    #[display("invalid transition: {_0}")]
    InvalidTransition(#[error(not(source))] TransitionRejection),
    #[display("relationship store unavailable: {_0}")]
    #[from(skip)]
    StoreUnavailable(RelationshipStoreError),
}

impl From<RelationshipStoreError> for RelationshipError {
    fn from(err: RelationshipStoreError) -> Self {
        match err {
            RelationshipStoreError::AccountNotFound(account_id) => {
                RelationshipError::UnknownAccount(account_id)
            }
            err => RelationshipError::StoreUnavailable(err),
        }
    }
}
