//! Export file naming
//!
//! Every record kind exports as a plain JSON document named
//! `<entityName>.<suffix>.json`, with no envelope around the record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;

/// The record kinds that can be exported, with their file suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Character,
    Item,
    Quest,
    Dialogue,
    Object,
    Spell,
    Faction,
    Location,
    Audio,
    Lore,
}

impl ExportKind {
    pub const ALL: [ExportKind; 10] = [
        Self::Character,
        Self::Item,
        Self::Quest,
        Self::Dialogue,
        Self::Object,
        Self::Spell,
        Self::Faction,
        Self::Location,
        Self::Audio,
        Self::Lore,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Character => "char",
            Self::Item => "item",
            Self::Quest => "quest",
            Self::Dialogue => "dlg",
            Self::Object => "obj",
            Self::Spell => "spell",
            Self::Faction => "faction",
            Self::Location => "location",
            Self::Audio => "audio",
            Self::Lore => "lore",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ExportKind {
    type Err = DomainError;

    /// Accepts either the suffix (`dlg`) or the kind name (`dialogue`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let by_name = match lower.as_str() {
            "character" => Some(Self::Character),
            "dialogue" => Some(Self::Dialogue),
            "object" => Some(Self::Object),
            _ => None,
        };
        by_name
            .or_else(|| Self::ALL.into_iter().find(|k| k.suffix() == lower))
            .ok_or_else(|| DomainError::parse(format!("Unknown export kind: {}", s)))
    }
}

/// Records that can be written out as standalone JSON documents.
pub trait Exportable: Serialize {
    const KIND: ExportKind;

    /// Stem used when the record has no usable name.
    const FALLBACK_STEM: &'static str;

    /// The author-facing name the file is named after.
    fn export_name(&self) -> &str;

    fn export_file_name(&self) -> String {
        let name = self.export_name().trim();
        let stem = if name.is_empty() {
            Self::FALLBACK_STEM
        } else {
            name
        };
        export_file_name(stem, Self::KIND)
    }

    /// Pretty-printed JSON of the record itself.
    fn to_export_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `<stem>.<suffix>.json`, with path separators in the stem replaced.
pub fn export_file_name(stem: &str, kind: ExportKind) -> String {
    let safe: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.{}.json", safe, kind.suffix())
}
