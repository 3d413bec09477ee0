//! Per-group serialization
//!
//! Requests for the same group run one at a time; different groups proceed
//! concurrently.

use packvote_domain::GroupId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per group id
#[derive(Debug, Default)]
pub struct GroupLocks {
    locks: Mutex<HashMap<GroupId, Arc<Mutex<()>>>>,
}

impl GroupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other holder works on `group`.
    ///
    /// The guard releases the group when dropped. Entries nobody holds or
    /// waits on are pruned here, so the registry only tracks live groups.
    pub async fn acquire(&self, group: &GroupId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // holders and waiters each own a clone; the map's copy alone means idle
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(group.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of groups currently tracked by the registry
    pub async fn tracked_groups(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_group_is_serialized() {
        let locks = Arc::new(GroupLocks::new());
        let group = GroupId::new("G1");

        let guard = locks.acquire(&group).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            let group = group.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&group).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_groups_do_not_block() {
        let locks = GroupLocks::new();
        let _first = locks.acquire(&GroupId::new("G1")).await;
        let second = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(&GroupId::new("G2")),
        )
        .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_idle_groups_are_pruned() {
        let locks = GroupLocks::new();

        for id in ["G1", "G2", "G3"] {
            let guard = locks.acquire(&GroupId::new(id)).await;
            drop(guard);
        }

        // only the most recent group survives the sweep on acquire
        assert_eq!(locks.tracked_groups().await, 1);
    }

    #[tokio::test]
    async fn test_held_group_survives_pruning() {
        let locks = Arc::new(GroupLocks::new());
        let held = GroupId::new("G1");
        let guard = locks.acquire(&held).await;

        drop(locks.acquire(&GroupId::new("G2")).await);
        drop(locks.acquire(&GroupId::new("G3")).await);
        assert_eq!(locks.tracked_groups().await, 2);

        let waiter = {
            let locks = Arc::clone(&locks);
            let held = held.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&held).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }
}
