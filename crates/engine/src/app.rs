//! Application state and composition.

use std::sync::Arc;

use loreforge_domain::{Character, DialogueLibrary, Item, Quest};

use crate::infrastructure::{
    config::EngineConfig,
    export::JsonExporter,
    memory::{MemoryCounterStore, MemoryRepo},
    ports::{CharacterRepo, CounterStore, DialogueRepo, ItemRepo, QuestRepo},
};
use crate::use_cases::{
    content::{SaveCharacter, SaveItem, SaveQuest},
    ContentUseCases, DialogueOps, IdAllocator,
};

/// Main application state.
///
/// Holds all repositories and use cases.
pub struct App {
    pub config: EngineConfig,
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub exporter: Arc<JsonExporter>,
}

/// Container for all repository ports.
#[derive(Clone)]
pub struct Repositories {
    pub counters: Arc<dyn CounterStore>,
    pub character: Arc<dyn CharacterRepo>,
    pub item: Arc<dyn ItemRepo>,
    pub quest: Arc<dyn QuestRepo>,
    pub dialogue: Arc<dyn DialogueRepo>,
}

impl Repositories {
    /// Fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            counters: Arc::new(MemoryCounterStore::new()),
            character: Arc::new(MemoryRepo::<Character>::new()),
            item: Arc::new(MemoryRepo::<Item>::new()),
            quest: Arc::new(MemoryRepo::<Quest>::new()),
            dialogue: Arc::new(MemoryRepo::<DialogueLibrary>::new()),
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub ids: Arc<IdAllocator>,
    pub content: ContentUseCases,
    pub dialogue: Arc<DialogueOps>,
}

impl App {
    pub fn new(repositories: Repositories, config: EngineConfig) -> Self {
        let ids = Arc::new(IdAllocator::new(
            repositories.counters.clone(),
            config.allocator.clone(),
        ));

        let content = ContentUseCases::new(
            Arc::new(SaveCharacter::new(
                repositories.character.clone(),
                ids.clone(),
            )),
            Arc::new(SaveItem::new(repositories.item.clone(), ids.clone())),
            Arc::new(SaveQuest::new(repositories.quest.clone(), ids.clone())),
        );
        let dialogue = Arc::new(DialogueOps::new(
            repositories.dialogue.clone(),
            repositories.quest.clone(),
        ));
        let exporter = Arc::new(JsonExporter::new(config.export_dir.clone()));

        Self {
            config,
            repositories,
            use_cases: UseCases {
                ids,
                content,
                dialogue,
            },
            exporter,
        }
    }

    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(Repositories::in_memory(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loreforge_domain::{CharacterId, DialogueCondition, ItemId, QuestProgress};

    #[tokio::test]
    async fn character_id_is_stable_across_saves() {
        let app = App::in_memory(EngineConfig::default());
        let save = &app.use_cases.content.save_character;

        let first = save.execute(Character::new("Bailen")).await.unwrap();
        let mut edited = Character::new("Bailen");
        edited.description = "Ranger of the north".into();
        let second = save.execute(edited).await.unwrap();
        let other = save.execute(Character::new("Mira")).await.unwrap();

        assert_eq!(first.id, CharacterId::new(1));
        assert_eq!(second.id, CharacterId::new(1));
        assert_eq!(other.id, CharacterId::new(2));
    }

    #[tokio::test]
    async fn counters_are_independent_per_kind() {
        let app = App::in_memory(EngineConfig::default());

        let item = app
            .use_cases
            .content
            .save_item
            .execute(Item::new("Torch"))
            .await
            .unwrap();
        let quest = app
            .use_cases
            .content
            .save_quest
            .execute(Quest::new("Q1"))
            .await
            .unwrap();

        assert_eq!(item.item_id, Some(ItemId::new(1)));
        assert_eq!(quest.quest_id.map(|id| id.get()), Some(1));
    }

    #[tokio::test]
    async fn dialogue_gated_on_saved_quest() {
        let app = App::in_memory(EngineConfig::default());
        let mut quest = Quest::new("Q1");
        quest.add_step();
        app.use_cases
            .content
            .save_quest
            .execute(quest)
            .await
            .unwrap();

        let dialogue = &app.use_cases.dialogue;
        let steps = dialogue.step_options("Q1").await.unwrap();
        let entry = dialogue.add_entry("Bailen", "Quest line").await.unwrap();
        dialogue
            .set_condition(
                "Bailen",
                entry.entry_id,
                DialogueCondition::new("Q1", steps[0].clone(), "active"),
            )
            .await
            .unwrap();

        let picked = dialogue
            .preview("Bailen", &QuestProgress::new("Q1", 1u32, "active"))
            .await
            .unwrap();
        assert_eq!(picked.map(|e| e.display_name), Some("Quest line".to_string()));
    }
}
