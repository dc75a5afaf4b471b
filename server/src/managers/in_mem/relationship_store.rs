use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use friends_common::{AccountId, RelationshipRecord};
use tokio::sync::Mutex;

use crate::managers::{error::RelationshipStoreError, traits::RelationshipStore};

#[derive(Clone, Default)]
pub struct InMemoryRelationshipStore {
    records: Arc<Mutex<HashMap<AccountId, RelationshipRecord>>>,
}

#[async_trait]
impl RelationshipStore for InMemoryRelationshipStore {
    async fn create(
        &mut self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError> {
        Ok(self
            .records
            .lock()
            .await
            .entry(account_id.clone())
            .or_insert_with(|| RelationshipRecord::new(account_id.clone()))
            .clone())
    }

    async fn get(
        &self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError> {
        self.records
            .lock()
            .await
            .get(account_id)
            .cloned()
            .ok_or_else(|| RelationshipStoreError::AccountNotFound(account_id.clone()))
    }

    async fn save(&mut self, record: &RelationshipRecord) -> Result<(), RelationshipStoreError> {
        let mut records = self.records.lock().await;
        let stored = records
            .get_mut(record.account_id())
            .ok_or_else(|| RelationshipStoreError::AccountNotFound(record.account_id().clone()))?;
        *stored = record.clone();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use friends_common::{AccountId, RelationshipList, RelationshipRecord};

    use crate::managers::{
        error::RelationshipStoreError, in_mem::InMemoryRelationshipStore,
        traits::RelationshipStore,
    };

    #[tokio::test]
    async fn get_unknown_account() {
        let store = InMemoryRelationshipStore::default();
        let alice = AccountId::generate();

        assert!(store
            .get(&alice)
            .await
            .is_err_and(|err| matches!(err, RelationshipStoreError::AccountNotFound(id) if id == alice)));
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let mut store = InMemoryRelationshipStore::default();
        let alice = AccountId::generate();
        let bob = AccountId::generate();

        let mut record = store.create(&alice).await.expect("Can create record");
        record.push(RelationshipList::Outgoing, bob.clone(), Utc::now());
        store.save(&record).await.expect("Can save record");

        let again = store.create(&alice).await.expect("Can create record twice");
        assert!(again.contains(RelationshipList::Outgoing, &bob));
    }

    #[tokio::test]
    async fn save_requires_existing_record() {
        let mut store = InMemoryRelationshipStore::default();
        let record = RelationshipRecord::new(AccountId::generate());

        assert!(store
            .save(&record)
            .await
            .is_err_and(|err| matches!(err, RelationshipStoreError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn save_pair_replaces_both() {
        let mut store = InMemoryRelationshipStore::default();
        let alice = AccountId::generate();
        let bob = AccountId::generate();
        let mut first = store.create(&alice).await.expect("Can create alice");
        let mut second = store.create(&bob).await.expect("Can create bob");

        let now = Utc::now();
        first.push(RelationshipList::Outgoing, bob.clone(), now);
        second.push(RelationshipList::Incoming, alice.clone(), now);
        store
            .save_pair(&first, &second)
            .await
            .expect("Can save both records");

        assert_eq!(store.get(&alice).await.expect("Alice exists"), first);
        assert_eq!(store.get(&bob).await.expect("Bob exists"), second);
    }
}
