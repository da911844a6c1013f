use std::fs::{self, File, OpenOptions};
use std::io::{Write, BufReader};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use anyhow::Context;

use crate::error::FeedError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub blocked: Vec<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub last_refresh: Option<u64>,
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_id: String::from("me"),
            display_name: String::from("Me"),
            blocked: Vec::new(),
            page_size: default_page_size(),
            last_refresh: None,
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf, FeedError> {
        let path = dirs::home_dir()
            .ok_or_else(|| FeedError::Config("Could not find home directory".to_string()))?
            .join(".config/artfeed/config.json");
        Ok(path)
    }

    pub fn load() -> Result<Self, FeedError> {
        let config_path = Self::config_path()?;

        let file = File::open(&config_path)
            .with_context(|| format!("Failed to open config file at {:?}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context("Failed to parse config JSON")?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), FeedError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory at {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self)
            .context("Failed to serialize config to JSON")?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&config_path)
            .with_context(|| format!("Failed to open config file for writing at {:?}", config_path))?;

        file.write_all(json.as_bytes())
            .context("Failed to write config data")?;

        Ok(())
    }

    pub fn get_last_refresh(&self) -> u64 {
        match self.last_refresh {
            Some(ts) => ts,
            None => 0,
        }
    }

    pub fn update_last_refresh(&mut self) {
        let timestamp_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.last_refresh = Some(timestamp_now);
    }
}
