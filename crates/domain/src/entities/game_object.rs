//! Interactable world objects (signs, chests, mounts, breakables)
//!
//! Objects can have their own dialogue library, keyed by object name.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ExportKind, Exportable};

/// Prompt shown when no custom one is set.
pub const DEFAULT_INTERACTION_PROMPT: &str = "Interact";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractType {
    #[default]
    None,
    Read,
    PickUp,
    Mount,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[default]
    None,
    Stone,
    Wood,
    Metal,
    Flesh,
    Plant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialSubtype {
    #[default]
    None,
    Ruby,
    Sapphire,
    Emerald,
    Diamond,
    Iron,
    Steel,
    Bronze,
    Gold,
    Silver,
    Leather,
    Cloth,
    Bone,
    Bark,
    Glass,
    Crystal,
    Clay,
}

/// Damage types an object can resist. Stored as plain strings.
pub const DAMAGE_TYPES: [&str; 6] = ["Blunt", "Slash", "Pierce", "Fire", "Frost", "Magic"];

fn default_prompt() -> String {
    DEFAULT_INTERACTION_PROMPT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    #[serde(default)]
    pub object_name: String,
    #[serde(default = "default_prompt")]
    pub interaction_prompt: String,
    #[serde(default)]
    pub interact_type: InteractType,
    #[serde(default)]
    pub obj_material: Material,
    #[serde(default)]
    pub obj_material_subtype: MaterialSubtype,
    #[serde(default)]
    pub resistances: Vec<String>,
    /// Item name the object yields or represents
    #[serde(default)]
    pub associated_item: String,
    #[serde(default)]
    pub wait_for_signal: bool,
    #[serde(default)]
    pub has_health: bool,
    #[serde(default)]
    pub max_health: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
}

impl Default for GameObject {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            interaction_prompt: default_prompt(),
            interact_type: InteractType::None,
            obj_material: Material::None,
            obj_material_subtype: MaterialSubtype::None,
            resistances: Vec::new(),
            associated_item: String::new(),
            wait_for_signal: false,
            has_health: false,
            max_health: 0,
            uid: String::new(),
        }
    }
}

impl GameObject {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Self::default()
        }
    }

    /// Add the resistance if missing, remove it if present.
    pub fn toggle_resistance(&mut self, damage_type: &str) {
        match self.resistances.iter().position(|r| r == damage_type) {
            Some(index) => {
                self.resistances.remove(index);
            }
            None => self.resistances.push(damage_type.to_string()),
        }
    }

    /// Store key: the object name, unless it is purely numeric, in which
    /// case the associated item (or "UnnamedObject") is used instead.
    pub fn store_key(&self) -> &str {
        let numeric =
            !self.object_name.is_empty() && self.object_name.bytes().all(|b| b.is_ascii_digit());
        match (numeric, self.associated_item.is_empty()) {
            (false, _) => &self.object_name,
            (true, false) => &self.associated_item,
            (true, true) => "UnnamedObject",
        }
    }
}

impl Exportable for GameObject {
    const KIND: ExportKind = ExportKind::Object;
    const FALLBACK_STEM: &'static str = "Object";

    fn export_name(&self) -> &str {
        &self.object_name
    }
}
