use super::Config;
use super::types::glyphcodex_dir;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let dir = glyphcodex_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).context("Failed to create .glyphcodex directory")?;
        }
        Self::load_or_init_at(&dir.join("config.toml"))
    }

    /// Load `config_path`, writing defaults there first if it is missing.
    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dream.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "dream.interval_secs must be at least 1".into(),
            ));
        }
        if self.ritual.steps == 0 {
            return Err(ConfigError::Validation(
                "ritual.steps must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.service.base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "service.base_url {:?} is not a valid URL: {e}",
                self.service.base_url
            ))
        })?;
        Ok(())
    }
}
