use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Numeric ids issued by the counter store. Zero means "not yet issued".
macro_rules! define_numeric_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const UNASSIGNED: Self = Self(0);

            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn get(self) -> u64 {
                self.0
            }

            /// Issued ids start at 1.
            pub fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// String uids generated client-side. An empty uid means "not yet generated".
macro_rules! define_uid {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Keep an existing uid, or generate one if empty.
            pub fn or_generate(self) -> Self {
                if self.is_empty() {
                    Self::generate()
                } else {
                    self
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

// Counter-backed primary ids
define_numeric_id!(CharacterId);
define_numeric_id!(ItemId);
define_numeric_id!(QuestId);

// Client-generated uids
define_uid!(FactionUid);
define_uid!(LocationUid);
define_uid!(LoreUid);

/// Deserializes an optional numeric id that older documents may store as
/// `null`, `""`, `0`, a number, or a numeric string.
pub(crate) fn deserialize_lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<u64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    let value = match raw {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse::<u64>().map_err(serde::de::Error::custom)?)
            }
        }
    };

    Ok(value.filter(|n| *n > 0).map(T::from))
}

/// Like [`deserialize_lenient_id`], for fields that store "unassigned" as zero.
pub(crate) fn deserialize_id_or_unassigned<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<u64> + Default,
{
    Ok(deserialize_lenient_id(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_lenient_id")]
        id: Option<QuestId>,
    }

    fn parse(json: &str) -> Option<QuestId> {
        serde_json::from_str::<Holder>(json).unwrap().id
    }

    #[test]
    fn lenient_id_accepts_legacy_shapes() {
        assert_eq!(parse(r#"{"id": 7}"#), Some(QuestId::new(7)));
        assert_eq!(parse(r#"{"id": "12"}"#), Some(QuestId::new(12)));
        assert_eq!(parse(r#"{"id": ""}"#), None);
        assert_eq!(parse(r#"{"id": null}"#), None);
        assert_eq!(parse(r#"{"id": 0}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn lenient_id_rejects_garbage_text() {
        let result = serde_json::from_str::<Holder>(r#"{"id": "seven"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn numeric_id_zero_is_unassigned() {
        assert!(!CharacterId::UNASSIGNED.is_assigned());
        assert!(CharacterId::new(1).is_assigned());
        assert_eq!(CharacterId::new(42).to_string(), "42");
    }

    #[test]
    fn uid_or_generate_keeps_existing() {
        let uid = FactionUid::from("abc");
        assert_eq!(uid.clone().or_generate(), uid);
        assert!(!FactionUid::default().or_generate().is_empty());
    }
}
