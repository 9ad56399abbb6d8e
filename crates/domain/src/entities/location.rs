//! Location entity - Named places, optionally split into sublocations

use serde::{Deserialize, Serialize};

use crate::ids::LocationUid;
use crate::value_objects::{ExportKind, Exportable};

pub const LOCATION_VERSION: u32 = 1;

fn current_version() -> u32 {
    LOCATION_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub description: String,
    pub notes: String,
    /// Names of places inside this one
    pub sublocations: Vec<String>,
    pub uid: LocationUid,
    #[serde(default = "current_version")]
    pub version: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            notes: String::new(),
            sublocations: Vec::new(),
            uid: LocationUid::default(),
            version: LOCATION_VERSION,
        }
    }
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: LocationUid::generate(),
            ..Self::default()
        }
    }

    /// Stamp the uid and current version before saving.
    pub fn prepare_for_save(&mut self) {
        self.uid = std::mem::take(&mut self.uid).or_generate();
        self.version = LOCATION_VERSION;
    }
}

impl Exportable for Location {
    const KIND: ExportKind = ExportKind::Location;
    const FALLBACK_STEM: &'static str = "NewLocation";

    fn export_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_for_save_stamps_uid_and_version() {
        let mut location: Location =
            serde_json::from_str(r#"{"name": "Old Mill", "version": 0}"#).unwrap();
        assert!(location.uid.is_empty());

        location.prepare_for_save();
        assert!(!location.uid.is_empty());
        assert_eq!(location.version, LOCATION_VERSION);
    }

    #[test]
    fn test_missing_version_defaults_to_current() {
        let location: Location = serde_json::from_str(r#"{"name": "Harbor"}"#).unwrap();
        assert_eq!(location.version, 1);
    }
}
