/// Application configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tune_catalog::CatalogConfig;
use tune_playback::PlaybackConfig;

/// Config file read when present in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tune.toml";

/// Environment variable prefix (`TUNE_CATALOG__PAGE_SIZE=50`)
pub const ENV_PREFIX: &str = "TUNE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://tune.db".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `tune.toml`; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load with an explicit environment map instead of the process
    /// environment
    pub fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (TUNE_ prefix, __ between levels)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.catalog
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "storage.database_url cannot be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_from(None, env(&[])).unwrap();

        assert_eq!(config.catalog.base_url, "https://api.deezer.com");
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.catalog.proxies.len(), 2);
        assert_eq!(config.playback.volume, 0.5);
        assert_eq!(config.storage.database_url, "sqlite://tune.db");
        config.validate().unwrap();
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let config = AppConfig::load_from(
            None,
            env(&[
                ("TUNE_CATALOG__PAGE_SIZE", "50"),
                ("TUNE_PLAYBACK__VOLUME", "0.8"),
                ("TUNE_STORAGE__DATABASE_URL", "sqlite::memory:"),
            ]),
        )
        .unwrap();

        assert_eq!(config.catalog.page_size, 50);
        assert_eq!(config.playback.volume, 0.8);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
    }

    #[test]
    fn file_values_are_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[catalog]
base_url = "https://catalog.example.com"
proxies = [{{ prefix = "https://proxy.example.com/get?url=", envelope = "contents" }}]

[playback]
repeat = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.catalog.base_url, "https://catalog.example.com");
        assert_eq!(config.catalog.proxies.len(), 1);
        assert!(config.playback.repeat);
        assert_eq!(config.playback.volume, 0.5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/tune.toml")), env(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.catalog.proxies.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.database_url = " ".to_string();
        assert!(config.validate().is_err());
    }
}
