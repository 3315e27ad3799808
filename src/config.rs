use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CONFIG_PATH;
use crate::error::{CatalogError, Result};

pub const CATALOG_PATH_ENV: &str = "AMC_CATALOG_PATH";
pub const LOG_FILTER_ENV: &str = "AMC_LOG_FILTER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub filter: String,
    pub log_dir: PathBuf,
    /// Also write JSON logs to a daily-rotated file under `log_dir`
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "amc_catalog=info".to_string(),
            log_dir: PathBuf::from("logs"),
            json_file: false,
        }
    }
}

impl Config {
    /// Load `amc.toml` from the working directory, then apply `.env` and
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                CatalogError::Config(format!(
                    "Failed to read config file '{}': {}",
                    config_path.display(),
                    e
                ))
            })?;
            Self::from_toml(&config_content)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(CATALOG_PATH_ENV) {
            if !path.is_empty() {
                self.catalog.path = Some(PathBuf::from(path));
            }
        }
        if let Ok(filter) = std::env::var(LOG_FILTER_ENV) {
            if !filter.is_empty() {
                self.logging.filter = filter;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
[catalog]
path = "movies.xml"
"#,
        )
        .unwrap();

        assert_eq!(config.catalog.path, Some(PathBuf::from("movies.xml")));
        assert_eq!(config.logging.filter, "amc_catalog=info");
        assert!(!config.logging.json_file);
    }

    #[test]
    fn test_from_toml_logging() {
        let config = Config::from_toml(
            r#"
[logging]
filter = "amc_catalog=debug"
log_dir = "/tmp/amc"
json_file = true
"#,
        )
        .unwrap();

        assert!(config.catalog.path.is_none());
        assert_eq!(config.logging.filter, "amc_catalog=debug");
        assert_eq!(config.logging.log_dir, PathBuf::from("/tmp/amc"));
        assert!(config.logging.json_file);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = Config::from_toml("[logging]\njson_file = \"yes\"").unwrap_err();
        assert!(matches!(err, CatalogError::Toml(_)));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.logging.log_dir, PathBuf::from("logs"));
    }
}
