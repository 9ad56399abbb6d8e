//! Permanent id allocation
//!
//! Ids are issued from named counters with an optimistic compare-and-set
//! loop: read the counter, try to move it one step forward, and retry from
//! a fresh read if another writer got there first. Issued values are never
//! reissued, and a loop that keeps losing gives up after a bounded number of
//! attempts instead of spinning.

use std::sync::Arc;

use loreforge_domain::{CharacterId, ItemId, QuestId};

use crate::infrastructure::ports::{CounterStore, RepoError};

/// Counter behind [`CharacterId`].
pub const CHARACTER_COUNTER: &str = "characterId";
/// Counter behind [`ItemId`].
pub const ITEM_COUNTER: &str = "itemId";
/// Counter behind [`QuestId`].
pub const QUEST_COUNTER: &str = "questId";

/// Configuration for the allocation loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Compare-and-set attempts before giving up (at least 1)
    pub max_attempts: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { max_attempts: 8 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// Every attempt lost the race; nothing was allocated.
    #[error("Counter {counter} still contended after {attempts} attempts")]
    Exhausted { counter: String, attempts: u32 },
    #[error("Counter {counter} cannot be incremented past its maximum")]
    Overflow { counter: String },
    #[error("Counter store error: {0}")]
    Store(#[from] RepoError),
}

/// Issues permanent numeric ids from a [`CounterStore`].
pub struct IdAllocator {
    store: Arc<dyn CounterStore>,
    config: AllocatorConfig,
}

impl IdAllocator {
    pub fn new(store: Arc<dyn CounterStore>, config: AllocatorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocate the next value of `counter`. The first value issued is 1.
    pub async fn allocate(&self, counter: &str) -> Result<u64, AllocationError> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let current = self.store.read(counter).await?.unwrap_or(0);
            let next = current
                .checked_add(1)
                .ok_or_else(|| AllocationError::Overflow {
                    counter: counter.to_string(),
                })?;

            if self.store.compare_and_set(counter, current, next).await? {
                if attempt > 1 {
                    tracing::debug!(counter, attempt, id = next, "Allocated id after contention");
                }
                return Ok(next);
            }

            tracing::debug!(
                counter,
                attempt,
                max_attempts,
                expected = current,
                "Counter moved during allocation, retrying"
            );
            if attempt < max_attempts {
                tokio::task::yield_now().await;
            }
        }

        tracing::warn!(
            counter,
            attempts = max_attempts,
            "Id allocation gave up under contention"
        );
        Err(AllocationError::Exhausted {
            counter: counter.to_string(),
            attempts: max_attempts,
        })
    }

    pub async fn character_id(&self) -> Result<CharacterId, AllocationError> {
        self.allocate(CHARACTER_COUNTER).await.map(CharacterId::new)
    }

    pub async fn item_id(&self) -> Result<ItemId, AllocationError> {
        self.allocate(ITEM_COUNTER).await.map(ItemId::new)
    }

    pub async fn quest_id(&self) -> Result<QuestId, AllocationError> {
        self.allocate(QUEST_COUNTER).await.map(QuestId::new)
    }
}
