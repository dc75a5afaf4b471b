use async_trait::async_trait;
use friends_common::{AccountId, RelationshipRecord};

use crate::managers::error::RelationshipStoreError;

#[async_trait]
pub trait RelationshipStore: Send + Sync + Clone + 'static {
    /// Creates an empty record unless one already exists, and returns the stored record.
    async fn create(
        &mut self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError>;

    async fn get(
        &self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError>;

    /// Replaces the stored record of `record.account_id()`.
    async fn save(&mut self, record: &RelationshipRecord) -> Result<(), RelationshipStoreError>;

    /// Saves both sides of a transition, `first` before `second`.
    ///
    /// The default is two independent writes; a failure after the first
    /// leaves the pair half-applied.
    async fn save_pair(
        &mut self,
        first: &RelationshipRecord,
        second: &RelationshipRecord,
    ) -> Result<(), RelationshipStoreError> {
        self.save(first).await?;
        self.save(second).await
    }
}
