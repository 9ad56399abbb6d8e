//! Domain entities - Persisted authoring records

mod audio;
mod character;
mod dialogue;
mod faction;
mod game_object;
mod item;
mod location;
mod lore;
mod quest;
mod spell;

pub use audio::{Audio, AUDIO_VERSION, DEFAULT_AUDIO_CATEGORY};
pub use character::{
    Character, FactionAffiliation, MapPosition, Stats, AGES, CHARACTER_SCHEMA_VERSION,
    DEFAULT_STAT, RACES, SEXES,
};
pub use dialogue::{
    DialogueCondition, DialogueEntry, DialogueLibrary, DialogueSelection, LibraryIssue,
    DEFAULT_ENTRY_NAME,
};
pub use faction::Faction;
pub use game_object::{
    GameObject, InteractType, Material, MaterialSubtype, DAMAGE_TYPES, DEFAULT_INTERACTION_PROMPT,
};
pub use item::Item;
pub use location::{Location, LOCATION_VERSION};
pub use lore::Lore;
pub use quest::{GoalType, Quest, QuestStep};
pub use spell::Spell;
