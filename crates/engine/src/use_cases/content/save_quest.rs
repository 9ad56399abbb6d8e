//! Save quest use case.

use std::sync::Arc;

use loreforge_domain::{DomainError, Quest};

use crate::infrastructure::ports::QuestRepo;
use crate::use_cases::allocation::IdAllocator;

use super::error::ContentError;

/// Saves a quest under its name, issuing a `questId` only when it has none.
pub struct SaveQuest {
    quest_repo: Arc<dyn QuestRepo>,
    ids: Arc<IdAllocator>,
}

impl SaveQuest {
    pub fn new(quest_repo: Arc<dyn QuestRepo>, ids: Arc<IdAllocator>) -> Self {
        Self { quest_repo, ids }
    }

    pub async fn execute(&self, mut quest: Quest) -> Result<Quest, ContentError> {
        let name = quest.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Quest name is required").into());
        }
        quest.name = name;

        if quest.quest_id.is_none() {
            quest.quest_id = Some(self.ids.quest_id().await?);
        }

        self.quest_repo.save(&quest).await?;
        tracing::info!(
            quest = %quest.name,
            quest_id = ?quest.quest_id,
            steps = quest.steps.len(),
            "Quest saved"
        );

        Ok(quest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCounterStore, MockQuestRepo};
    use crate::use_cases::allocation::{AllocationError, AllocatorConfig};
    use loreforge_domain::QuestId;

    fn ids(store: MockCounterStore, max_attempts: u32) -> Arc<IdAllocator> {
        Arc::new(IdAllocator::new(
            Arc::new(store),
            AllocatorConfig { max_attempts },
        ))
    }

    #[tokio::test]
    async fn existing_quest_id_skips_allocation() {
        let mut repo = MockQuestRepo::new();
        repo.expect_save()
            .withf(|q| q.quest_id == Some(QuestId::new(4)))
            .times(1)
            .returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().never();
        counters.expect_compare_and_set().never();

        let mut quest = Quest::new("The Lost Heir");
        quest.quest_id = Some(QuestId::new(4));

        let use_case = SaveQuest::new(Arc::new(repo), ids(counters, 8));
        assert!(use_case.execute(quest).await.is_ok());
    }

    #[tokio::test]
    async fn missing_quest_id_is_allocated() {
        let mut repo = MockQuestRepo::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().returning(|_| Ok(Some(2)));
        counters
            .expect_compare_and_set()
            .returning(|_, _, _| Ok(true));

        let use_case = SaveQuest::new(Arc::new(repo), ids(counters, 8));
        let saved = use_case.execute(Quest::new("Q1")).await.unwrap();

        assert_eq!(saved.quest_id, Some(QuestId::new(3)));
    }

    #[tokio::test]
    async fn exhaustion_never_writes() {
        let mut repo = MockQuestRepo::new();
        repo.expect_save().never();

        let mut counters = MockCounterStore::new();
        counters.expect_read().times(1).returning(|_| Ok(None));
        counters
            .expect_compare_and_set()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let use_case = SaveQuest::new(Arc::new(repo), ids(counters, 1));
        let result = use_case.execute(Quest::new("Q1")).await;

        assert!(matches!(
            result,
            Err(ContentError::Allocation(AllocationError::Exhausted {
                attempts: 1,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let use_case = SaveQuest::new(
            Arc::new(MockQuestRepo::new()),
            ids(MockCounterStore::new(), 8),
        );
        assert!(matches!(
            use_case.execute(Quest::new("")).await,
            Err(ContentError::Validation(_))
        ));
    }
}
