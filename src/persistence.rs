use crate::types::Config;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub struct PersistenceManager {
    config_dir: PathBuf,
}

impl PersistenceManager {
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "pagenav")
            .context("Failed to determine config directory")?;

        Self::with_dir(project_dirs.config_dir().to_path_buf())
    }

    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(PersistenceManager { config_dir })
    }

    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_dir.join("config.json");

        if !config_path.exists() {
            // Create default config
            let config = Config::default();
            self.save_config(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config file: {}. Using defaults.", e);
            Config::default()
        });

        Ok(config.validated())
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        let config_path = self.config_dir.join("config.json");
        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}
