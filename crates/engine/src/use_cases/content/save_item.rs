//! Save item use case.

use std::sync::Arc;

use loreforge_domain::{DomainError, Item};

use crate::infrastructure::ports::ItemRepo;
use crate::use_cases::allocation::IdAllocator;

use super::error::ContentError;

/// Saves an item under its trimmed `itemName`, issuing an `itemID` on first save.
pub struct SaveItem {
    item_repo: Arc<dyn ItemRepo>,
    ids: Arc<IdAllocator>,
}

impl SaveItem {
    pub fn new(item_repo: Arc<dyn ItemRepo>, ids: Arc<IdAllocator>) -> Self {
        Self { item_repo, ids }
    }

    pub async fn execute(&self, mut item: Item) -> Result<Item, ContentError> {
        let item_name = item.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(DomainError::validation("Item name is required").into());
        }
        item.item_name = item_name;

        if item.item_id.is_none() {
            item.item_id = Some(self.ids.item_id().await?);
        }
        if item.display_name.trim().is_empty() {
            item.display_name = item.default_display_name();
        }

        self.item_repo.save(&item).await?;
        tracing::info!(
            item = %item.item_name,
            item_id = ?item.item_id,
            "Item saved"
        );

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCounterStore, MockItemRepo};
    use crate::use_cases::allocation::{AllocatorConfig, ITEM_COUNTER};
    use loreforge_domain::ItemId;

    fn ids(store: MockCounterStore) -> Arc<IdAllocator> {
        Arc::new(IdAllocator::new(Arc::new(store), AllocatorConfig::default()))
    }

    #[tokio::test]
    async fn when_name_is_blank_returns_validation_error() {
        let mut repo = MockItemRepo::new();
        repo.expect_save().never();

        let use_case = SaveItem::new(Arc::new(repo), ids(MockCounterStore::new()));
        let result = use_case.execute(Item::new("  ")).await;

        assert!(matches!(result, Err(ContentError::Validation(_))));
    }

    #[tokio::test]
    async fn new_item_gets_id_and_display_name() {
        let mut repo = MockItemRepo::new();
        repo.expect_save()
            .withf(|item| {
                item.item_name == "Rusty Key"
                    && item.item_id == Some(ItemId::new(1))
                    && item.display_name == "Rusty Key (Item)"
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters
            .expect_read()
            .withf(|name| name == ITEM_COUNTER)
            .returning(|_| Ok(None));
        counters
            .expect_compare_and_set()
            .withf(|name, expected, proposed| name == ITEM_COUNTER && *expected == 0 && *proposed == 1)
            .returning(|_, _, _| Ok(true));

        let use_case = SaveItem::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(Item::new(" Rusty Key ")).await.unwrap();

        assert_eq!(saved.item_id, Some(ItemId::new(1)));
    }

    #[tokio::test]
    async fn existing_id_and_display_name_are_kept() {
        let mut repo = MockItemRepo::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().never();

        let mut item = Item::new("Torch");
        item.item_id = Some(ItemId::new(9));
        item.display_name = "Pine Torch".into();

        let use_case = SaveItem::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(item).await.unwrap();

        assert_eq!(saved.item_id, Some(ItemId::new(9)));
        assert_eq!(saved.display_name, "Pine Torch");
    }

    #[tokio::test]
    async fn counter_store_failure_aborts_before_write() {
        let mut repo = MockItemRepo::new();
        repo.expect_save().never();

        let mut counters = MockCounterStore::new();
        counters.expect_read().returning(|_| {
            Err(crate::infrastructure::ports::RepoError::storage(
                "read", "offline",
            ))
        });

        let use_case = SaveItem::new(Arc::new(repo), ids(counters));
        let result = use_case.execute(Item::new("Torch")).await;

        assert!(matches!(result, Err(ContentError::Allocation(_))));
    }
}
