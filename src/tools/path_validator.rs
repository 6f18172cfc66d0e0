use crate::tools::is_mp4_file;
use anyhow::{Result, bail};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

/// 確認影片檔存在且副檔名為 `.mp4`
pub fn validate_video_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("影片檔不存在: {}", path.display());
    }
    if !is_mp4_file(path) {
        bail!("只支援 .mp4 影片: {}", path.display());
    }
    Ok(())
}
