use crate::config::types::{Config, SETTINGS_FILE, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_path(PathBuf::from(SETTINGS_FILE))
    }

    /// 從指定的設定檔建立設定，檔案不存在或無法解析時使用預設值
    pub fn from_path(settings_path: PathBuf) -> Result<Self> {
        let settings = Self::load_settings(&settings_path).unwrap_or_else(|e| {
            warn!("{e:#}");
            UserSettings::default()
        });

        Ok(Self {
            settings,
            settings_path,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
