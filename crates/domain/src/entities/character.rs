//! Character entity - NPCs and other named characters in the game world
//!
//! Characters are keyed by name in the store and carry a permanent numeric id
//! issued by the `characterId` counter.

use serde::{Deserialize, Serialize};

use crate::ids::{deserialize_id_or_unassigned, CharacterId};
use crate::value_objects::{ExportKind, Exportable};

/// Current character document layout.
pub const CHARACTER_SCHEMA_VERSION: u32 = 1;

pub const RACES: [&str; 9] = [
    "Human", "Elf", "Half-Elf", "Goblin", "Halfling", "Sylvari", "Dracari", "Orc", "Dwarf",
];
pub const SEXES: [&str; 2] = ["M", "F"];
pub const AGES: [&str; 3] = ["Child", "Adult", "Elder"];

/// Base attribute used when a document does not set one.
pub const DEFAULT_STAT: i32 = 10;

fn default_stat() -> i32 {
    DEFAULT_STAT
}

fn current_schema_version() -> u32 {
    CHARACTER_SCHEMA_VERSION
}

/// The six core attributes. Missing attributes fall back to [`DEFAULT_STAT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "Str", default = "default_stat")]
    pub strength: i32,
    #[serde(rename = "Dex", default = "default_stat")]
    pub dexterity: i32,
    #[serde(rename = "Int", default = "default_stat")]
    pub intelligence: i32,
    #[serde(rename = "Wis", default = "default_stat")]
    pub wisdom: i32,
    #[serde(rename = "Cha", default = "default_stat")]
    pub charisma: i32,
    #[serde(rename = "Con", default = "default_stat")]
    pub constitution: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STAT,
            dexterity: DEFAULT_STAT,
            intelligence: DEFAULT_STAT,
            wisdom: DEFAULT_STAT,
            charisma: DEFAULT_STAT,
            constitution: DEFAULT_STAT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionAffiliation {
    #[serde(default)]
    pub faction: String,
    /// Free-form standing, e.g. "Sworn", "Informant"
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub is_member: bool,
}

/// Where the character is placed on a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    #[serde(default, deserialize_with = "deserialize_id_or_unassigned")]
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub age: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub dialogue_file: String,
    #[serde(default)]
    pub quest_file: String,
    #[serde(default)]
    pub location: MapPosition,
    #[serde(default)]
    pub faction_affiliations: Vec<FactionAffiliation>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            schema_version: CHARACTER_SCHEMA_VERSION,
            id: CharacterId::UNASSIGNED,
            name: String::new(),
            race: String::new(),
            sex: String::new(),
            age: String::new(),
            class_name: String::new(),
            description: String::new(),
            stats: Stats::default(),
            equipment: Vec::new(),
            dialogue_file: String::new(),
            quest_file: String::new(),
            location: MapPosition::default(),
            faction_affiliations: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Tags derived from race, class and age, in that order.
    pub fn auto_tags(&self) -> Vec<String> {
        [&self.race, &self.class_name, &self.age]
            .into_iter()
            .filter(|value| !value.is_empty())
            .cloned()
            .collect()
    }

    /// Rebuild `tags` as the manual tags followed by the current auto tags.
    ///
    /// A tag counts as automatic if it is a known race, sex or age, or if it is
    /// part of the class name; those are dropped before the fresh auto tags are
    /// appended. Duplicates are removed, keeping the first occurrence.
    pub fn refresh_auto_tags(&mut self) {
        let manual = self.tags.iter().filter(|tag| {
            !RACES.contains(&tag.as_str())
                && !SEXES.contains(&tag.as_str())
                && !AGES.contains(&tag.as_str())
                && !self.class_name.contains(tag.as_str())
        });

        let mut combined: Vec<String> = Vec::new();
        for tag in manual.cloned().chain(self.auto_tags()) {
            if !combined.contains(&tag) {
                combined.push(tag);
            }
        }
        self.tags = combined;
    }

    /// Add a manual tag. Blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|t| t == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }
}

impl Exportable for Character {
    const KIND: ExportKind = ExportKind::Character;
    const FALLBACK_STEM: &'static str = "NewCharacter";

    fn export_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_tags_keep_manual_tags() {
        let mut character = Character::new("Bailen");
        character.race = "Elf".into();
        character.class_name = "Ranger".into();
        character.age = "Elder".into();
        character.tags = vec!["Human".into(), "Friendly".into(), "M".into(), "Adult".into()];

        character.refresh_auto_tags();

        assert_eq!(character.tags, vec!["Friendly", "Elf", "Ranger", "Elder"]);
    }

    #[test]
    fn test_auto_tags_drop_old_class_fragments() {
        let mut character = Character::new("Mira");
        character.class_name = "Battle Mage".into();
        character.tags = vec!["Mage".into(), "Merchant".into()];

        character.refresh_auto_tags();

        assert_eq!(character.tags, vec!["Merchant", "Battle Mage"]);
    }

    #[test]
    fn test_add_tag_ignores_blank_and_duplicates() {
        let mut character = Character::new("Bailen");
        assert!(character.add_tag(" Friendly "));
        assert!(!character.add_tag("Friendly"));
        assert!(!character.add_tag("   "));
        assert_eq!(character.tags, vec!["Friendly"]);
    }

    #[test]
    fn test_wire_names() {
        let mut character = Character::new("Bailen");
        character.id = CharacterId::new(3);
        character.class_name = "Ranger".into();

        let value = serde_json::to_value(&character).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["id"], 3);
        assert_eq!(value["class"], "Ranger");
        assert_eq!(value["stats"]["Str"], 10);
        assert_eq!(value["factionAffiliations"], serde_json::json!([]));
    }

    #[test]
    fn test_partial_stats_default_to_ten() {
        let character: Character =
            serde_json::from_str(r#"{"name": "Bailen", "stats": {"Str": 14}}"#).unwrap();
        assert_eq!(character.stats.strength, 14);
        assert_eq!(character.stats.constitution, DEFAULT_STAT);
        assert!(!character.id.is_assigned());
    }

    #[test]
    fn test_export_file_name_fallback() {
        assert_eq!(Character::new("Bailen").export_file_name(), "Bailen.char.json");
        assert_eq!(Character::new("  ").export_file_name(), "NewCharacter.char.json");
    }
}
