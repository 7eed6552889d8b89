//! Configuration management for capturelist.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::listable::Listable;
use crate::storage::FileRecord;
use crate::store::{ListStore, RecordFormat};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "capturelist";

/// Prefix for configuration environment variables.
const ENV_PREFIX: &str = "CAPTURELIST_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CAPTURELIST_`, sections split on `__`)
/// 2. TOML config file at `~/.config/capturelist/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration.
    pub store: StoreConfig,
}

/// Store-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one record file per record type.
    /// Defaults to `~/.local/share/capturelist`
    pub data_dir: Option<PathBuf>,
    /// Write indented JSON.
    pub pretty: bool,
    /// Create the data directory on first write.
    pub create_dirs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            pretty: false,
            create_dirs: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.store.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "store.data_dir must not be empty".to_string(),
                });
            }
            if dir.is_file() {
                return Err(Error::ConfigValidation {
                    message: format!("store.data_dir {} is a file", dir.display()),
                });
            }
        }
        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.store
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the record path for `T` inside the data directory.
    #[must_use]
    pub fn record_path<T: Listable>(&self) -> PathBuf {
        self.data_dir().join(T::record_filename())
    }

    /// Get the record encoding.
    #[must_use]
    pub fn record_format(&self) -> RecordFormat {
        if self.store.pretty {
            RecordFormat::Pretty
        } else {
            RecordFormat::Compact
        }
    }

    /// Open the store for `T` as configured.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn open_store<T: Listable>(&self) -> ListStore<T> {
        let record =
            FileRecord::new(self.record_path::<T>()).with_create_dirs(self.store.create_dirs);
        ListStore::with_backend(record, self.record_format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleEntry;
    use tempfile::TempDir;

    #[test]
    fn test_default_store_config() {
        let store = StoreConfig::default();

        assert!(store.data_dir.is_none());
        assert!(!store.pretty);
        assert!(store.create_dirs);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let mut config = Config::default();
        config.store.data_dir = Some(PathBuf::new());

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("data_dir"));
    }

    #[test]
    fn test_validate_data_dir_is_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.store.data_dir = Some(file.path().to_path_buf());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("is a file"));
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        assert!(config.data_dir().to_string_lossy().contains("capturelist"));
    }

    #[test]
    fn test_record_path() {
        let mut config = Config::default();
        config.store.data_dir = Some(PathBuf::from("/custom/data"));

        assert_eq!(
            config.record_path::<SampleEntry>(),
            PathBuf::from("/custom/data/SampleEntry.json")
        );
    }

    #[test]
    fn test_record_format() {
        let mut config = Config::default();
        assert_eq!(config.record_format(), RecordFormat::Compact);

        config.store.pretty = true;
        assert_eq!(config.record_format(), RecordFormat::Pretty);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("capturelist"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().store, StoreConfig::default());
    }

    #[test]
    fn test_load_reads_default_config_path() {
        let implicit = Config::load().map(|config| config.store);
        let explicit = Config::load_from(Some(Config::default_config_path()));
        assert_eq!(implicit.ok(), explicit.map(|config| config.store).ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[default.store]\ndata_dir = \"/srv/records\"\npretty = true\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.store.data_dir, Some(PathBuf::from("/srv/records")));
        assert!(config.store.pretty);
        assert!(config.store.create_dirs);
    }

    #[test]
    fn test_store_config_deserialize() {
        let json = r#"{"pretty": true}"#;
        let store: StoreConfig = serde_json::from_str(json).unwrap();
        assert!(store.pretty);
        assert!(store.create_dirs);
        assert!(store.data_dir.is_none());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("data_dir"));
        assert!(json.contains("pretty"));
    }

    #[tokio::test]
    async fn test_open_store_uses_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.store.data_dir = Some(dir.path().join("records"));

        let store = config.open_store::<SampleEntry>();
        store.insert(SampleEntry::new("", "Blue", "Daisy"));
        store.flush().await.unwrap();

        assert!(dir.path().join("records").join("SampleEntry.json").exists());
    }
}
