use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use deadtasks_core::{ListConfig, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL_MS, PAGE_SIZE_OPTIONS};
use deadtasks_engine::StoreSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Console settings, read from a RON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub queue: String,
    /// Zero or negative disables polling.
    pub poll_interval_ms: i64,
    pub page_size: usize,
    pub request_timeout_ms: u64,
    pub clear_selection_on_page_change: bool,
    pub log_destination: LogDestination,
    pub log_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            queue: "default".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_ms: 10_000,
            clear_selection_on_page_change: false,
            log_destination: LogDestination::File,
            log_path: PathBuf::from("./deadtasks.log"),
        }
    }
}

impl Settings {
    pub fn list_config(&self) -> ListConfig {
        let mut page_size_options = PAGE_SIZE_OPTIONS.to_vec();
        if !page_size_options.contains(&self.page_size) {
            page_size_options.push(self.page_size);
            page_size_options.sort_unstable();
        }
        ListConfig {
            queue: self.queue.clone(),
            poll_interval_ms: self.poll_interval_ms,
            page_size: self.page_size,
            page_size_options,
            clear_selection_on_page_change: self.clear_selection_on_page_change,
        }
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..StoreSettings::default()
        }
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.queue.trim().is_empty() {
            return Err(SettingsError::Invalid("queue must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(SettingsError::Invalid("page_size must be positive".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::Invalid(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Loads settings from `path`. `Ok(None)` means there is no file at `path`.
pub fn load(path: &Path) -> Result<Option<Settings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings: Settings = ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    settings.validate().map(Some)
}
