//! Engine configuration from environment variables.
//!
//! `main` loads `.env.local` and `.env` from the repo root first, so values
//! there behave like exported variables.

use std::path::PathBuf;

use crate::use_cases::allocation::AllocatorConfig;

pub const MAX_ATTEMPTS_VAR: &str = "LOREFORGE_ALLOCATOR_MAX_ATTEMPTS";
pub const EXPORT_DIR_VAR: &str = "LOREFORGE_EXPORT_DIR";

const DEFAULT_EXPORT_DIR: &str = "exports";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub allocator: AllocatorConfig,
    /// Directory exports are written to
    pub export_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allocator: AllocatorConfig::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source. Unset or blank variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value_of = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = value_of(MAX_ATTEMPTS_VAR) {
            let max_attempts = raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: MAX_ATTEMPTS_VAR,
                    value: raw.clone(),
                    reason: "expected a positive integer",
                })?;
            config.allocator.max_attempts = max_attempts;
        }

        if let Some(dir) = value_of(EXPORT_DIR_VAR) {
            config.export_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
