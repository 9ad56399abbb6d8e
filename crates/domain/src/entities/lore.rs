//! Lore entity - World knowledge entries with free-form tags

use serde::{Deserialize, Serialize};

use crate::ids::LoreUid;
use crate::value_objects::{ExportKind, Exportable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lore {
    /// Title of the entry (e.g., "The Fall of House Valeren")
    pub title: String,
    /// Brief summary for quick reference
    pub summary: String,
    pub full_text: String,
    /// Tags for filtering/searching
    pub tags: Vec<String>,
    /// Generated on first save
    pub uid: LoreUid,
}

impl Lore {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn ensure_uid(&mut self) {
        self.uid = std::mem::take(&mut self.uid).or_generate();
    }

    /// Add a trimmed tag if it is not already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|t| t == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Exportable for Lore {
    const KIND: ExportKind = ExportKind::Lore;
    const FALLBACK_STEM: &'static str = "NewLore";

    fn export_name(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let mut lore = Lore::new("The Fall of House Valeren");
        assert!(lore.add_tag(" history "));
        assert!(!lore.add_tag("history"));
        assert!(lore.has_tag("history"));
        lore.remove_tag("history");
        assert!(lore.tags.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let mut lore = Lore::new("Valeren");
        lore.full_text = "Long ago...".into();
        lore.ensure_uid();

        let value = serde_json::to_value(&lore).unwrap();
        assert_eq!(value["fullText"], "Long ago...");
        assert!(!value["uid"].as_str().unwrap().is_empty());
        assert_eq!(lore.export_file_name(), "Valeren.lore.json");
    }
}
