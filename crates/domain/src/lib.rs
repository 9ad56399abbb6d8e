//! Loreforge domain layer
//!
//! Pure types and algorithms for game-content authoring: entity schemas,
//! the dialogue script tokenizer, and the dialogue selection contract.
//! Nothing in this crate performs I/O.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod migration;
pub mod value_objects;

pub use entities::{
    Audio, Character, DialogueCondition, DialogueEntry, DialogueLibrary, DialogueSelection,
    Faction, FactionAffiliation, GameObject, GoalType, InteractType, Item, LibraryIssue, Location,
    Lore, MapPosition, Material, MaterialSubtype, Quest, QuestStep, Spell, Stats,
    CHARACTER_SCHEMA_VERSION, DEFAULT_ENTRY_NAME,
};

pub use error::DomainError;

pub use ids::{CharacterId, FactionUid, ItemId, LocationUid, LoreUid, QuestId};

pub use migration::migrate_character;

pub use value_objects::{
    export_file_name, leaves, reconstruct, tokenize, ExportKind, Exportable, ParamKind,
    QuestProgress, StepRef, Token, TokenKind,
};
