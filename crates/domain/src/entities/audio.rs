//! Audio metadata - Themes, ambience and effects
//!
//! Only the metadata lives here; the audio file itself sits in blob storage
//! behind `fileUrl`.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ExportKind, Exportable};

pub const AUDIO_VERSION: u32 = 1;
pub const DEFAULT_AUDIO_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Audio {
    /// e.g. "audio_20250415094523"
    pub id: String,
    pub name: String,
    /// "Theme", "Battle", "Ambient", "Other"
    pub category: String,
    pub description: String,
    pub external_link: String,
    pub file_url: String,
    pub version: u32,
}

impl Default for Audio {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: DEFAULT_AUDIO_CATEGORY.to_string(),
            description: String::new(),
            external_link: String::new(),
            file_url: String::new(),
            version: AUDIO_VERSION,
        }
    }
}

impl Audio {
    pub fn has_source(&self) -> bool {
        !self.file_url.is_empty() || !self.external_link.is_empty()
    }
}

impl Exportable for Audio {
    const KIND: ExportKind = ExportKind::Audio;
    const FALLBACK_STEM: &'static str = "Audio";

    fn export_name(&self) -> &str {
        &self.name
    }
}
