//! Faction entity - Groups characters can be affiliated with

use serde::{Deserialize, Serialize};

use crate::ids::FactionUid;
use crate::value_objects::{ExportKind, Exportable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faction {
    pub name: String,
    pub description: String,
    pub notes: String,
    /// Character names
    pub members: Vec<String>,
    pub uid: FactionUid,
}

impl Faction {
    /// A blank faction with a freshly generated uid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: FactionUid::generate(),
            ..Self::default()
        }
    }

    /// Generate a uid if the document does not have one yet.
    pub fn ensure_uid(&mut self) {
        self.uid = std::mem::take(&mut self.uid).or_generate();
    }

    pub fn add_member(&mut self, character: &str) -> bool {
        if character.is_empty() || self.members.iter().any(|m| m == character) {
            return false;
        }
        self.members.push(character.to_string());
        true
    }
}

impl Exportable for Faction {
    const KIND: ExportKind = ExportKind::Faction;
    const FALLBACK_STEM: &'static str = "NewFaction";

    fn export_name(&self) -> &str {
        &self.name
    }
}
