//! In-memory adapters for the storage ports.
//!
//! Used by tests and by the CLI. Counters are updated through DashMap's entry
//! API, which holds the shard lock for the whole compare-and-set, so the
//! check and the write cannot interleave with another writer.

use std::marker::PhantomData;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;

use loreforge_domain::{Character, DialogueLibrary, Item, Quest};

use crate::infrastructure::ports::{
    CharacterRepo, CounterStore, DialogueRepo, ItemRepo, QuestRepo, RepoError, Snapshots,
};

// =============================================================================
// Counters
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: DashMap<String, u64>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a counter, e.g. from an imported dataset.
    pub fn with_counter(self, name: &str, value: u64) -> Self {
        self.counters.insert(name.to_string(), value);
        self
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self, name: &str) -> Result<Option<u64>, RepoError> {
        Ok(self.counters.get(name).map(|value| *value))
    }

    async fn compare_and_set(
        &self,
        name: &str,
        expected: u64,
        proposed: u64,
    ) -> Result<bool, RepoError> {
        if proposed < expected {
            return Err(RepoError::constraint(format!(
                "counter {} cannot move from {} back to {}",
                name, expected, proposed
            )));
        }

        let swapped = match self.counters.entry(name.to_string()) {
            Entry::Occupied(mut entry) if *entry.get() == expected => {
                entry.insert(proposed);
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) if expected == 0 => {
                entry.insert(proposed);
                true
            }
            Entry::Vacant(_) => false,
        };
        Ok(swapped)
    }
}

// =============================================================================
// Records
// =============================================================================

/// How a record type is keyed in its store.
pub trait RecordKey: Clone + Send + Sync + 'static {
    const ENTITY_TYPE: &'static str;

    fn record_key(&self) -> &str;
}

impl RecordKey for Character {
    const ENTITY_TYPE: &'static str = "Character";

    fn record_key(&self) -> &str {
        &self.name
    }
}

impl RecordKey for Item {
    const ENTITY_TYPE: &'static str = "Item";

    fn record_key(&self) -> &str {
        &self.item_name
    }
}

impl RecordKey for Quest {
    const ENTITY_TYPE: &'static str = "Quest";

    fn record_key(&self) -> &str {
        &self.name
    }
}

impl RecordKey for DialogueLibrary {
    const ENTITY_TYPE: &'static str = "DialogueLibrary";

    fn record_key(&self) -> &str {
        &self.subject_id
    }
}

/// Keyed record store. Every key owns a watch channel so subscribers see
/// saves and deletions; deleted records stay as `None` in their channel.
///
/// Keys are trimmed on every path, so `" Torch "` and `"Torch"` name the
/// same record.
#[derive(Debug)]
pub struct MemoryRepo<T> {
    records: DashMap<String, watch::Sender<Option<T>>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Default for MemoryRepo<T> {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            _record: PhantomData,
        }
    }
}

impl<T: RecordKey> MemoryRepo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_record(&self, key: &str) -> Option<T> {
        self.records.get(key.trim()).and_then(|tx| tx.borrow().clone())
    }

    fn save_record(&self, record: &T) -> Result<(), RepoError> {
        let key = record.record_key().trim();
        if key.is_empty() {
            return Err(RepoError::constraint(format!(
                "{} key cannot be empty",
                T::ENTITY_TYPE
            )));
        }
        self.records
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(None).0)
            .send_replace(Some(record.clone()));
        Ok(())
    }

    fn delete_record(&self, key: &str) -> Result<(), RepoError> {
        let key = key.trim();
        let previous = self
            .records
            .get(key)
            .and_then(|tx| tx.send_replace(None));
        match previous {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found(T::ENTITY_TYPE, key)),
        }
    }

    fn list_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .records
            .iter()
            .filter(|entry| entry.value().borrow().is_some())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    fn subscribe(&self, key: &str) -> Snapshots<T> {
        let rx = self
            .records
            .entry(key.trim().to_string())
            .or_insert_with(|| watch::channel(None).0)
            .subscribe();
        Snapshots::new(rx)
    }
}

#[async_trait]
impl CharacterRepo for MemoryRepo<Character> {
    async fn get(&self, name: &str) -> Result<Option<Character>, RepoError> {
        Ok(self.get_record(name))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.save_record(character)
    }

    async fn delete(&self, name: &str) -> Result<(), RepoError> {
        self.delete_record(name)
    }

    async fn list_names(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.list_keys())
    }
}

#[async_trait]
impl ItemRepo for MemoryRepo<Item> {
    async fn get(&self, item_name: &str) -> Result<Option<Item>, RepoError> {
        Ok(self.get_record(item_name))
    }

    async fn save(&self, item: &Item) -> Result<(), RepoError> {
        self.save_record(item)
    }

    async fn delete(&self, item_name: &str) -> Result<(), RepoError> {
        self.delete_record(item_name)
    }

    async fn list_names(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.list_keys())
    }
}

#[async_trait]
impl QuestRepo for MemoryRepo<Quest> {
    async fn get(&self, name: &str) -> Result<Option<Quest>, RepoError> {
        Ok(self.get_record(name))
    }

    async fn save(&self, quest: &Quest) -> Result<(), RepoError> {
        self.save_record(quest)
    }

    async fn delete(&self, name: &str) -> Result<(), RepoError> {
        self.delete_record(name)
    }

    async fn list_names(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.list_keys())
    }
}

#[async_trait]
impl DialogueRepo for MemoryRepo<DialogueLibrary> {
    async fn get(&self, subject_id: &str) -> Result<Option<DialogueLibrary>, RepoError> {
        Ok(self.get_record(subject_id))
    }

    async fn save(&self, library: &DialogueLibrary) -> Result<(), RepoError> {
        self.save_record(library)
    }

    async fn delete(&self, subject_id: &str) -> Result<(), RepoError> {
        self.delete_record(subject_id)
    }

    async fn list_subjects(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.list_keys())
    }

    async fn watch(&self, subject_id: &str) -> Result<Snapshots<DialogueLibrary>, RepoError> {
        Ok(self.subscribe(subject_id))
    }
}
