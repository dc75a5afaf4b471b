use std::{collections::HashMap, sync::Arc};

use friends_common::AccountId;
use tokio::sync::{Mutex, OwnedMutexGuard};

type AccountLock = Arc<Mutex<()>>;

/// Per-account mutual exclusion for transitions.
///
/// Entries nobody holds or waits on are pruned on the next acquisition.
#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<Mutex<HashMap<AccountId, AccountLock>>>,
}

/// Held for the duration of one transition.
pub struct PairGuard {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}

impl AccountLocks {
    /// Locks both accounts, always in sorted order, so opposite-direction
    /// transitions over the same pair cannot deadlock.
    pub async fn lock_pair(&self, a: &AccountId, b: &AccountId) -> PairGuard {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let (first, second) = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            let first = locks.entry(low.clone()).or_default().clone();
            let second = (low != high).then(|| locks.entry(high.clone()).or_default().clone());
            (first, second)
        };

        let first = first.lock_owned().await;
        let second = match second {
            Some(lock) => Some(lock.lock_owned().await),
            None => None,
        };
        PairGuard {
            _first: first,
            _second: second,
        }
    }

    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
