//! Save character use case.
//!
//! Keeps a character's id stable across saves: the id already stored under
//! the character's name wins, then the id the editor holds, and only a
//! character with neither gets a fresh one from the `characterId` counter.

use std::sync::Arc;

use loreforge_domain::{Character, DomainError, CHARACTER_SCHEMA_VERSION};

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::allocation::IdAllocator;

use super::error::ContentError;

pub struct SaveCharacter {
    character_repo: Arc<dyn CharacterRepo>,
    ids: Arc<IdAllocator>,
}

impl SaveCharacter {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, ids: Arc<IdAllocator>) -> Self {
        Self {
            character_repo,
            ids,
        }
    }

    /// Execute the save character use case.
    ///
    /// # Returns
    /// * `Ok(Character)` - The character as written, with its permanent id
    /// * `Err(ContentError)` - Validation, allocation or storage failure
    pub async fn execute(&self, mut character: Character) -> Result<Character, ContentError> {
        let name = character.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty").into());
        }
        character.name = name;

        let stored_id = self
            .character_repo
            .get(&character.name)
            .await?
            .map(|stored| stored.id)
            .filter(|id| id.is_assigned());

        character.id = match stored_id {
            Some(id) => id,
            None if character.id.is_assigned() => character.id,
            None => self.ids.character_id().await?,
        };
        character.schema_version = CHARACTER_SCHEMA_VERSION;
        character.refresh_auto_tags();

        self.character_repo.save(&character).await?;
        tracing::info!(
            character = %character.name,
            id = %character.id,
            "Character saved"
        );

        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockCounterStore};
    use crate::use_cases::allocation::{AllocationError, AllocatorConfig, CHARACTER_COUNTER};
    use loreforge_domain::CharacterId;

    fn ids(store: MockCounterStore) -> Arc<IdAllocator> {
        Arc::new(IdAllocator::new(
            Arc::new(store),
            AllocatorConfig { max_attempts: 2 },
        ))
    }

    fn stored(name: &str, id: u64) -> Character {
        let mut character = Character::new(name);
        character.id = CharacterId::new(id);
        character
    }

    #[tokio::test]
    async fn when_name_is_blank_returns_validation_error() {
        let repo = MockCharacterRepo::new();
        let use_case = SaveCharacter::new(Arc::new(repo), ids(MockCounterStore::new()));

        let result = use_case.execute(Character::new("   ")).await;

        assert!(matches!(result, Err(ContentError::Validation(_))));
    }

    #[tokio::test]
    async fn when_stored_id_exists_it_wins_over_local_id() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .withf(|name| name == "Bailen")
            .returning(|_| Ok(Some(stored("Bailen", 7))));
        repo.expect_save()
            .withf(|c| c.id == CharacterId::new(7))
            .times(1)
            .returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().never();

        let use_case = SaveCharacter::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(stored("Bailen", 3)).await.unwrap();

        assert_eq!(saved.id, CharacterId::new(7));
    }

    #[tokio::test]
    async fn when_only_local_id_exists_it_is_kept() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored("Bailen", 0))));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().never();

        let use_case = SaveCharacter::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(stored("Bailen", 3)).await.unwrap();

        assert_eq!(saved.id, CharacterId::new(3));
    }

    #[tokio::test]
    async fn when_new_character_allocates_id() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save()
            .withf(|c| c.id == CharacterId::new(12) && c.name == "Mira")
            .times(1)
            .returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters
            .expect_read()
            .withf(|name| name == CHARACTER_COUNTER)
            .returning(|_| Ok(Some(11)));
        counters
            .expect_compare_and_set()
            .returning(|_, _, _| Ok(true));

        let use_case = SaveCharacter::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(Character::new(" Mira ")).await.unwrap();

        assert_eq!(saved.id, CharacterId::new(12));
    }

    #[tokio::test]
    async fn when_allocation_exhausted_nothing_is_written() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().never();

        let mut counters = MockCounterStore::new();
        counters.expect_read().times(2).returning(|_| Ok(Some(1)));
        counters
            .expect_compare_and_set()
            .times(2)
            .returning(|_, _, _| Ok(false));

        let use_case = SaveCharacter::new(Arc::new(repo), ids(counters));
        let result = use_case.execute(Character::new("Mira")).await;

        assert!(matches!(
            result,
            Err(ContentError::Allocation(AllocationError::Exhausted { .. }))
        ));
    }

    #[tokio::test]
    async fn save_refreshes_auto_tags() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().returning(|_| Ok(()));

        let mut counters = MockCounterStore::new();
        counters.expect_read().returning(|_| Ok(None));
        counters
            .expect_compare_and_set()
            .returning(|_, _, _| Ok(true));

        let mut character = Character::new("Bailen");
        character.race = "Elf".into();
        character.tags = vec!["Friendly".into()];

        let use_case = SaveCharacter::new(Arc::new(repo), ids(counters));
        let saved = use_case.execute(character).await.unwrap();

        assert_eq!(saved.tags, vec!["Friendly", "Elf"]);
    }
}
