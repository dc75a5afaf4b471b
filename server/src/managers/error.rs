use derive_more::{Display, Error, From};
use friends_common::AccountId;

#[derive(Debug, Display, Error, From)]
pub enum RelationshipStoreError {
    #[display("no relationship record for account '{_0}'")]
    #[from(skip)]
    AccountNotFound(#[error(not(source))] AccountId),
    Database(sqlx::Error),
    Migration(sqlx::migrate::MigrateError),
}
