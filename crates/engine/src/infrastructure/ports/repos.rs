//! Repository port traits for record storage.
//!
//! Records are keyed by their author-facing name, the same way the stored
//! documents are: characters by `name`, items by `itemName`, quests by
//! `name`, dialogue libraries by `subjectId`.

use async_trait::async_trait;
use loreforge_domain::{Character, DialogueLibrary, Item, Quest};

use super::error::RepoError;
use super::snapshots::Snapshots;

// =============================================================================
// Counters
// =============================================================================

/// Monotonic named counters backing permanent numeric ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value, or `None` if the counter was never written.
    async fn read(&self, name: &str) -> Result<Option<u64>, RepoError>;

    /// Atomically set the counter to `proposed` if it still equals `expected`.
    ///
    /// An absent counter compares equal to 0. Returns `false` when the counter
    /// moved in the meantime.
    async fn compare_and_set(
        &self,
        name: &str,
        expected: u64,
        proposed: u64,
    ) -> Result<bool, RepoError>;
}

// =============================================================================
// Record Ports (one per record type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, name: &str) -> Result<(), RepoError>;
    async fn list_names(&self) -> Result<Vec<String>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepo: Send + Sync {
    async fn get(&self, item_name: &str) -> Result<Option<Item>, RepoError>;
    async fn save(&self, item: &Item) -> Result<(), RepoError>;
    async fn delete(&self, item_name: &str) -> Result<(), RepoError>;
    async fn list_names(&self) -> Result<Vec<String>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Quest>, RepoError>;
    async fn save(&self, quest: &Quest) -> Result<(), RepoError>;
    async fn delete(&self, name: &str) -> Result<(), RepoError>;
    async fn list_names(&self) -> Result<Vec<String>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueRepo: Send + Sync {
    async fn get(&self, subject_id: &str) -> Result<Option<DialogueLibrary>, RepoError>;
    async fn save(&self, library: &DialogueLibrary) -> Result<(), RepoError>;
    async fn delete(&self, subject_id: &str) -> Result<(), RepoError>;
    async fn list_subjects(&self) -> Result<Vec<String>, RepoError>;

    /// Subscribe to one library. The handle starts at the stored value.
    async fn watch(&self, subject_id: &str) -> Result<Snapshots<DialogueLibrary>, RepoError>;
}
