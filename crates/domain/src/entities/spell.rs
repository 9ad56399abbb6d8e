//! Spell entity - Castable abilities, keyed by spell name
//!
//! Numeric enums (`spellType`, `damageType`, `magicSchool`, `spellShape`) are
//! interpreted by the game engine and stored as plain integers.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ExportKind, Exportable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spell {
    pub spell_name: String,
    pub description: String,
    /// Engine prefab path
    pub spell_prefab: String,
    pub spell_type: i32,
    pub damage_type: i32,
    pub magic_school: i32,
    pub mana_cost: i32,
    pub base_damage: i32,
    pub heal_amount: i32,
    pub base_buff_value: i32,
    pub power_scaling: f64,
    pub cooldown: f64,
    pub cast_time: f64,
    pub effect_duration: f64,
    pub aoe_radius: f64,
    pub spell_shape: i32,
    pub requires_line_of_sight: bool,
    pub can_be_held: bool,
}

impl Spell {
    pub fn new(spell_name: impl Into<String>) -> Self {
        Self {
            spell_name: spell_name.into(),
            ..Self::default()
        }
    }

    pub fn is_damaging(&self) -> bool {
        self.base_damage > 0
    }

    pub fn is_area(&self) -> bool {
        self.aoe_radius > 0.0
    }
}

impl Exportable for Spell {
    const KIND: ExportKind = ExportKind::Spell;
    const FALLBACK_STEM: &'static str = "NewSpell";

    fn export_name(&self) -> &str {
        &self.spell_name
    }
}
