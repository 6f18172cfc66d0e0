use crate::error::{ReviewError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 影片副檔名（區分大小寫，只比對檔名結尾）
pub const VIDEO_SUFFIX: &str = ".mp4";
pub const SIDECAR_SUFFIX: &str = ".json";
pub const SCREENSHOT_SUFFIX: &str = ".jpg";

/// 取得檔名去掉結尾 `.mp4` 後的部分
///
/// 只檢查檔名的最後一段，`movie.mp4.mp4` 只會去掉最後一個 `.mp4`。
/// 檔名剛好是 `.mp4`（沒有主檔名）也視為不是影片檔。
fn video_stem(video_path: &Path) -> Option<&str> {
    video_path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(VIDEO_SUFFIX))
        .filter(|stem| !stem.is_empty())
}

#[must_use]
pub fn is_mp4_file(path: &Path) -> bool {
    video_stem(path).is_some()
}

/// 由影片路徑推導側車檔路徑：`資料夾/主檔名.json`
pub fn sidecar_path(video_path: &Path) -> Result<PathBuf> {
    let stem = video_stem(video_path)
        .ok_or_else(|| ReviewError::NotAVideoFile(video_path.to_path_buf()))?;

    Ok(video_path.with_file_name(format!("{stem}{SIDECAR_SUFFIX}")))
}

/// 由影片路徑推導截圖路徑：直接在完整路徑後面加上 `.jpg`
#[must_use]
pub fn screenshot_path(video_path: &Path) -> PathBuf {
    let mut path = OsString::from(video_path.as_os_str());
    path.push(SCREENSHOT_SUFFIX);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path_replaces_suffix() {
        let path = sidecar_path(Path::new("/a/b/movie.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("/a/b/movie.json"));
    }

    #[test]
    fn test_sidecar_path_only_trailing_suffix() {
        let path = sidecar_path(Path::new("/a/b/movie.mp4.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("/a/b/movie.mp4.json"));

        let path = sidecar_path(Path::new("/a/b/my.mp4.clip.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("/a/b/my.mp4.clip.json"));
    }

    #[test]
    fn test_sidecar_path_keeps_directory() {
        let path = sidecar_path(Path::new("/videos.mp4/x.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("/videos.mp4/x.json"));

        let path = sidecar_path(Path::new("relative.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("relative.json"));
    }

    #[test]
    fn test_sidecar_path_rejects_other_extensions() {
        for name in ["/a/b/movie.mov", "/a/b/movie.MP4", "/a/b/movie.mp4x", "/a/b/.mp4"] {
            let err = sidecar_path(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, ReviewError::NotAVideoFile(ref p) if p == Path::new(name)),
                "{name} 應該被拒絕"
            );
        }
    }

    #[test]
    fn test_screenshot_path_appends_suffix() {
        assert_eq!(
            screenshot_path(Path::new("/a/b/movie.mp4")),
            PathBuf::from("/a/b/movie.mp4.jpg")
        );
        assert_eq!(
            screenshot_path(Path::new("/a/b/movie.mov")),
            PathBuf::from("/a/b/movie.mov.jpg")
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let video = Path::new("/data/clip.mp4");
        assert_eq!(sidecar_path(video).unwrap(), sidecar_path(video).unwrap());
        assert_eq!(screenshot_path(video), screenshot_path(video));
    }

    #[test]
    fn test_is_mp4_file() {
        assert!(is_mp4_file(Path::new("/x/a.mp4")));
        assert!(!is_mp4_file(Path::new("/x/a.mkv")));
        assert!(!is_mp4_file(Path::new("/x/.mp4")));
    }
}
