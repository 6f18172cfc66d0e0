use super::path_deriver::{is_mp4_file, sidecar_path};
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
    /// 是否已經有側車檔
    pub has_sidecar: bool,
}

/// 列出資料夾（不含子資料夾）中的 `.mp4` 檔案，依檔名排序
pub fn scan_video_files(directory: &Path) -> Result<Vec<VideoFileInfo>> {
    let mut video_files: Vec<VideoFileInfo> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_mp4_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            let has_sidecar = sidecar_path(entry.path()).is_ok_and(|p| p.is_file());

            Some(VideoFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
                has_sidecar,
            })
        })
        .collect();

    video_files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(video_files)
}
