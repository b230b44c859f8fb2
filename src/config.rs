use crate::core::library::DEFAULT_MAX_PICKS;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub history_file: PathBuf,
    pub library_file: PathBuf,
    #[serde(default = "default_max_picks")]
    pub max_picks: usize,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub pager: bool,
}

fn default_max_picks() -> usize {
    DEFAULT_MAX_PICKS
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = Self::config_dir();

        Self {
            general: GeneralConfig {
                history_file: data_dir.join("history.txt"),
                library_file: data_dir.join("library.txt"),
                max_picks: DEFAULT_MAX_PICKS,
                color: true,
                pager: true,
            },
        }
    }
}

impl Config {
    /// Load a config file, writing the defaults there first if it is missing
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)
            .map_err(|e| AppError::io(config_path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.history_file.as_os_str().is_empty() {
            return Err(AppError::Config("History file cannot be empty".to_string()));
        }

        if self.general.library_file.as_os_str().is_empty() {
            return Err(AppError::Config("Library file cannot be empty".to_string()));
        }

        if self.general.max_picks == 0 {
            return Err(AppError::Config(
                "max_picks must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::io(config_path, e))?;

        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptvault")
    }

    pub fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_custom(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.general.max_picks, 3);
        assert!(config.general.history_file.ends_with("history.txt"));
        assert!(config.general.library_file.ends_with("library.txt"));

        let reloaded = Config::load_custom(&path).unwrap();
        assert_eq!(reloaded.general.history_file, config.general.history_file);
    }

    #[test]
    fn test_optional_fields_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nhistory_file = \"/tmp/h.txt\"\nlibrary_file = \"/tmp/l.txt\"\n",
        )
        .unwrap();

        let config = Config::load_custom(&path).unwrap();
        assert_eq!(config.general.max_picks, 3);
        assert!(config.general.color);
        assert!(config.general.pager);
    }

    #[test]
    fn test_validate_rejects_zero_picks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nhistory_file = \"h.txt\"\nlibrary_file = \"l.txt\"\nmax_picks = 0\n",
        )
        .unwrap();

        assert!(matches!(Config::load_custom(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "general = 12").unwrap();
        assert!(matches!(Config::load_custom(&path), Err(AppError::Config(_))));
    }
}
