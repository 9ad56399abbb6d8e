//! JSON exporter for authored records
//!
//! Each record is written as its own pretty-printed document named
//! `<entityName>.<suffix>.json`, with no envelope around it.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use loreforge_domain::{
    migrate_character, Audio, DialogueLibrary, DomainError, ExportKind, Exportable, Faction,
    GameObject, Item, Location, Lore, Quest, Spell,
};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid record: {0}")]
    Domain(#[from] DomainError),
}

/// Writes records into a single export directory.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `record` would be written.
    pub fn path_for<T: Exportable>(&self, record: &T) -> PathBuf {
        self.dir.join(record.export_file_name())
    }

    /// Write one record, creating the export directory if needed.
    pub async fn export<T: Exportable + Sync>(&self, record: &T) -> Result<PathBuf, ExportError> {
        let json = record.to_export_json()?;
        let path = self.path_for(record);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::Io {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), kind = %T::KIND, "Record exported");
        Ok(path)
    }

    /// Parse an untyped document as `kind` and export it.
    ///
    /// Character documents go through schema migration first, so legacy
    /// files come out in the current layout.
    pub async fn export_document(
        &self,
        kind: ExportKind,
        document: Value,
    ) -> Result<PathBuf, ExportError> {
        match kind {
            ExportKind::Character => self.export(&migrate_character(document)?).await,
            ExportKind::Item => self.export(&parse::<Item>(document)?).await,
            ExportKind::Quest => self.export(&parse::<Quest>(document)?).await,
            ExportKind::Dialogue => self.export(&parse::<DialogueLibrary>(document)?).await,
            ExportKind::Object => self.export(&parse::<GameObject>(document)?).await,
            ExportKind::Spell => self.export(&parse::<Spell>(document)?).await,
            ExportKind::Faction => self.export(&parse::<Faction>(document)?).await,
            ExportKind::Location => self.export(&parse::<Location>(document)?).await,
            ExportKind::Audio => self.export(&parse::<Audio>(document)?).await,
            ExportKind::Lore => self.export(&parse::<Lore>(document)?).await,
        }
    }
}

fn parse<T: DeserializeOwned>(document: Value) -> Result<T, DomainError> {
    Ok(serde_json::from_value(document)?)
}
