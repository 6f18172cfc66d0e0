use crate::config::types::{Config, MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(config: &Config) -> Result<()> {
    let path = config.settings_path.as_path();
    let content =
        serde_json::to_string_pretty(&config.settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近開啟的影片
/// 將新路徑加入最前面，去重並限制數量，同時記住所在資料夾
pub fn add_recent_video(settings: &mut UserSettings, path: &Path) {
    // 移除已存在的相同路徑
    settings.recent_videos.retain(|p| p != path);

    // 加入到最前面
    settings.recent_videos.insert(0, path.to_path_buf());

    // 限制數量
    settings.recent_videos.truncate(MAX_RECENT_PATHS);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        settings.last_directory = Some(parent.to_path_buf());
    }
}
