use std::path::PathBuf;

use shuttle_runtime::SecretStore;
use thiserror::Error;

use crate::usage::DEFAULT_DAILY_LIMIT;

pub const DEFAULT_FILTER: &str = "v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DAILY_LIMIT must be a non-negative integer, got {0:?}")]
    InvalidDailyLimit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub daily_limit: u32,
    /// JSON file backing the usage store; in-memory when unset.
    pub storage_path: Option<PathBuf>,
    pub default_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            storage_path: None,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let daily_limit = match lookup("DAILY_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDailyLimit(raw))?,
            None => DEFAULT_DAILY_LIMIT,
        };
        let storage_path = lookup("STORAGE_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let default_filter = lookup("DEFAULT_FILTER")
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        Ok(Self {
            daily_limit,
            storage_path,
            default_filter,
        })
    }
}
