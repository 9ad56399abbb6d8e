//! Save workflows for id-bearing records.
//!
//! Characters, items and quests receive a permanent numeric id the first time
//! they are saved. Allocation happens before the write, so a failed
//! allocation never leaves a half-saved record behind.

mod error;
mod save_character;
mod save_item;
mod save_quest;

use std::sync::Arc;

pub use error::ContentError;
pub use save_character::SaveCharacter;
pub use save_item::SaveItem;
pub use save_quest::SaveQuest;

/// Container for content save use cases.
pub struct ContentUseCases {
    pub save_character: Arc<SaveCharacter>,
    pub save_item: Arc<SaveItem>,
    pub save_quest: Arc<SaveQuest>,
}

impl ContentUseCases {
    pub fn new(
        save_character: Arc<SaveCharacter>,
        save_item: Arc<SaveItem>,
        save_quest: Arc<SaveQuest>,
    ) -> Self {
        Self {
            save_character,
            save_item,
            save_quest,
        }
    }
}
