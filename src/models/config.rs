//! doccheck configuration
//!
//! Layers, later wins:
//! 1. built-in defaults
//! 2. `~/.doccheck/config.toml`
//! 3. `./doccheck.toml`
//! 4. `DOCCHECK_ENDPOINT` / `DOCCHECK_LOCALE`
//!
//! Command-line flags are applied on top by the caller.

use crate::services::messages::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "doccheck.toml";
pub const ENV_ENDPOINT: &str = "DOCCHECK_ENDPOINT";
pub const ENV_LOCALE: &str = "DOCCHECK_LOCALE";

/// Errors raised while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file '{0}': {1}")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidEnv(&'static str, String),
}

/// Web front-end settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upload body limit in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocCheckConfig {
    /// Checking API URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub locale: Locale,

    pub server: ServerConfig,
}

impl Default for DocCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/api/check".to_string(),
            timeout_secs: 300,
            locale: Locale::Ja,
            server: ServerConfig::default(),
        }
    }
}

impl DocCheckConfig {
    /// User-level config path (`~/.doccheck/config.toml`)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".doccheck").join("config.toml"))
    }

    /// Project-level config path
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// Load the layered config for a project directory, including environment overrides
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = Self::user_config_path()
            .into_iter()
            .chain(std::iter::once(Self::project_config_path(project_root)))
            .collect();

        let mut config = Self::load_files(&files)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Merge the given TOML files in order over the defaults. Missing files are skipped.
    pub fn load_files(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.clone(), e))?;
            let table: toml::Table =
                toml::from_str(&content).map_err(|e| ConfigError::Parse(path.clone(), e))?;
            tracing::debug!(path = %path.display(), "loaded config layer");
            merge_tables(&mut merged, table);
        }

        // Re-parse the merged table so field-level errors point at a real file
        let last = paths.last().cloned().unwrap_or_default();
        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| ConfigError::Parse(last, e))
    }

    /// Apply `DOCCHECK_ENDPOINT` and `DOCCHECK_LOCALE` when set
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_ENDPOINT).ok(),
            std::env::var(ENV_LOCALE).ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        endpoint: Option<String>,
        locale: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(locale) = locale.filter(|l| !l.trim().is_empty()) {
            self.locale = locale
                .parse()
                .map_err(|e| ConfigError::InvalidEnv(ENV_LOCALE, e))?;
        }
        Ok(())
    }

    /// Write this config as TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write(path.into(), e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write(path.into(), e))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DocCheckConfig::default();
        assert_eq!(config.endpoint, "http://localhost:5000/api/check");
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let temp = TempDir::new().unwrap();
        let config = DocCheckConfig::load_files(&[temp.path().join("nope.toml")]).unwrap();
        assert_eq!(config, DocCheckConfig::default());
    }

    #[test]
    fn test_later_layers_override_earlier_ones() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.toml");
        let project = temp.path().join("doccheck.toml");
        std::fs::write(
            &user,
            "endpoint = \"https://user.example/api/check\"\nlocale = \"en\"\n[server]\nport = 4000\n",
        )
        .unwrap();
        std::fs::write(&project, "[server]\nhost = \"0.0.0.0\"\n").unwrap();

        let config = DocCheckConfig::load_files(&[user, project]).unwrap();
        assert_eq!(config.endpoint, "https://user.example/api/check");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doccheck.toml");
        std::fs::write(&path, "endpoint = [").unwrap();

        let err = DocCheckConfig::load_files(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
    }

    #[test]
    fn test_overrides() {
        let mut config = DocCheckConfig::default();
        config
            .apply_overrides(Some("http://api.test/check".into()), Some("en".into()))
            .unwrap();
        assert_eq!(config.endpoint, "http://api.test/check");
        assert_eq!(config.locale, Locale::En);

        config.apply_overrides(Some("  ".into()), None).unwrap();
        assert_eq!(config.endpoint, "http://api.test/check");

        let err = config.apply_overrides(None, Some("xx".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv(ENV_LOCALE, _)));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/doccheck.toml");
        let mut config = DocCheckConfig::default();
        config.timeout_secs = 30;
        config.save(&path).unwrap();

        let loaded = DocCheckConfig::load_files(&[path]).unwrap();
        assert_eq!(loaded.timeout_secs, 30);
    }
}
