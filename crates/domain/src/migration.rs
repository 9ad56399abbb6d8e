//! Versioned loading of stored character documents
//!
//! Documents written before `schemaVersion` existed (version 0) were partial:
//! fields could be missing or `null`, and `stats` could hold only some of the
//! attributes. They are upgraded by overlaying them on a blank character,
//! merging nested objects key by key. Fields the blank character does not
//! have are dropped.

use serde_json::{Map, Value};

use crate::entities::{Character, CHARACTER_SCHEMA_VERSION};
use crate::error::DomainError;

const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// List fields that must be arrays after migration.
const LIST_FIELDS: [&str; 3] = ["equipment", "factionAffiliations", "tags"];

/// Schema version a stored document declares. Missing means legacy (0).
pub fn character_schema_version(document: &Value) -> Result<u32, DomainError> {
    match document.get(SCHEMA_VERSION_KEY) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| DomainError::parse(format!("Invalid schemaVersion: {}", value))),
    }
}

/// Load a stored character document of any known version.
pub fn migrate_character(document: Value) -> Result<Character, DomainError> {
    if !document.is_object() {
        return Err(DomainError::parse("Character document must be an object"));
    }

    match character_schema_version(&document)? {
        0 => migrate_legacy_character(document),
        CHARACTER_SCHEMA_VERSION => Ok(serde_json::from_value(document)?),
        version => Err(DomainError::unsupported_schema_version("Character", version)),
    }
}

fn migrate_legacy_character(document: Value) -> Result<Character, DomainError> {
    let Value::Object(legacy) = document else {
        return Err(DomainError::parse("Character document must be an object"));
    };
    let Value::Object(mut merged) = serde_json::to_value(Character::default())? else {
        return Err(DomainError::parse("Character template must be an object"));
    };

    let template_keys: Vec<String> = merged.keys().cloned().collect();
    for key in template_keys {
        let Some(old) = legacy.get(&key) else {
            continue;
        };
        if old.is_null() {
            continue;
        }
        if let Some(Value::Object(base)) = merged.get_mut(&key) {
            if let Value::Object(overlay) = old {
                merge_non_null(base, overlay);
            }
            continue;
        }
        merged.insert(key, old.clone());
    }

    for field in LIST_FIELDS {
        if !merged.get(field).is_some_and(Value::is_array) {
            merged.insert(field.to_string(), Value::Array(Vec::new()));
        }
    }
    merged.insert(
        SCHEMA_VERSION_KEY.to_string(),
        Value::from(CHARACTER_SCHEMA_VERSION),
    );

    Ok(serde_json::from_value(Value::Object(merged))?)
}

fn merge_non_null(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if !value.is_null() {
            base.insert(key.clone(), value.clone());
        }
    }
}
