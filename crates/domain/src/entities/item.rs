//! Item entity - Objects that can be carried, traded or equipped
//!
//! Items are keyed by `itemName`; `itemID` is issued by the `itemId` counter
//! the first time the item is saved.

use serde::{Deserialize, Serialize};

use crate::ids::{deserialize_lenient_id, ItemId};
use crate::value_objects::{ExportKind, Exportable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "itemID", default, deserialize_with = "deserialize_lenient_id")]
    pub item_id: Option<ItemId>,
    /// Store key, unique across items
    #[serde(default)]
    pub item_name: String,
    /// Name shown in game; defaults to "<itemName> (Item)" on save
    #[serde(default)]
    pub display_name: String,
    /// Longer lore description
    #[serde(default)]
    pub description: String,
    /// Short tooltip description
    #[serde(default)]
    pub item_description: String,
    /// Engine-side item category
    #[serde(default)]
    pub item_type: i32,
    #[serde(default)]
    pub gold_value: i32,
}

impl Item {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            ..Self::default()
        }
    }

    /// The display name used when none was set.
    pub fn default_display_name(&self) -> String {
        format!("{} (Item)", self.item_name)
    }
}

impl Exportable for Item {
    const KIND: ExportKind = ExportKind::Item;
    const FALLBACK_STEM: &'static str = "NewItem";

    fn export_name(&self) -> &str {
        &self.item_name
    }
}
