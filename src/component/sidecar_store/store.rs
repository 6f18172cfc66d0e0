use super::metadata::VideoMetadata;
use crate::error::{ReviewError, Result};
use crate::tools::sidecar_path;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 場景標記在側車檔中的欄位名稱（毫秒位置陣列）
pub const SCENES_KEY: &str = "scenes";

type Document = Map<String, Value>;

/// 讀取影片的側車檔
///
/// 側車檔不存在時回傳 `NotFound`，讓呼叫端區分「從未儲存」與「儲存過但是空的」。
pub fn load(video_path: &Path) -> Result<VideoMetadata> {
    let path = sidecar_path(video_path)?;
    let document = read_document(&path)?;
    metadata_from_document(&path, document)
}

/// 讀取側車檔，任何失敗都退回空白資料
#[must_use]
pub fn load_or_default(video_path: &Path) -> VideoMetadata {
    match load(video_path) {
        Ok(metadata) => metadata,
        Err(e) if e.is_missing_sidecar() => {
            info!("尚無可用的側車檔，使用空白資料: {e}");
            VideoMetadata::default()
        }
        Err(e) => {
            warn!("側車檔無法使用，使用空白資料: {e}");
            VideoMetadata::default()
        }
    }
}

/// 以 `metadata` 整份覆寫側車檔的描述欄位
///
/// 檔案中既有的場景標記會被保留。
pub fn save(video_path: &Path, metadata: &VideoMetadata) -> Result<()> {
    let path = sidecar_path(video_path)?;
    let scenes = read_existing(&path, "場景標記")
        .map(|document| scene_positions(&document))
        .unwrap_or_default();

    write_sidecar(&path, metadata, &scenes)?;
    info!("已儲存影片資料: {}", path.display());
    Ok(())
}

/// 讀取側車檔中的場景標記位置
pub fn load_scenes(video_path: &Path) -> Result<Vec<u64>> {
    let path = sidecar_path(video_path)?;
    let document = read_document(&path)?;
    Ok(scene_positions(&document))
}

/// 只替換側車檔中的場景標記，描述欄位維持檔案中的內容
///
/// 既有側車檔無法讀取或不是 JSON 物件時，描述欄位會以空白資料寫入。
pub fn save_scenes(video_path: &Path, positions: &[u64]) -> Result<()> {
    let path = sidecar_path(video_path)?;
    let metadata = read_existing(&path, "描述資料")
        .and_then(|document| match metadata_from_document(&path, document) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("無法保留描述資料，改以空白資料寫入: {e}");
                None
            }
        })
        .unwrap_or_default();

    write_sidecar(&path, &metadata, positions)?;
    info!("已儲存 {} 個場景標記: {}", positions.len(), path.display());
    Ok(())
}

fn read_document(path: &Path) -> Result<Document> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReviewError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ReviewError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(malformed(path, format!("頂層不是物件: {}", json_kind(&other)))),
        Err(e) => Err(malformed(path, e.to_string())),
    }
}

/// 寫入前讀取既有內容，讀不到就當作沒有
///
/// `kept` 是原本要從既有內容保留的部分，用於警告訊息。
fn read_existing(path: &Path, kept: &str) -> Option<Document> {
    match read_document(path) {
        Ok(document) => Some(document),
        Err(ReviewError::NotFound(_)) => None,
        Err(e) => {
            warn!("既有側車檔無法使用，{kept}將不會保留: {e}");
            None
        }
    }
}

fn metadata_from_document(path: &Path, document: Document) -> Result<VideoMetadata> {
    serde_json::from_value(Value::Object(document)).map_err(|e| malformed(path, e.to_string()))
}

fn scene_positions(document: &Document) -> Vec<u64> {
    let Some(items) = document.get(SCENES_KEY).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let position = item.as_u64();
            if position.is_none() {
                debug!("略過無效的場景位置: {item}");
            }
            position
        })
        .collect()
}

fn write_sidecar(path: &Path, metadata: &VideoMetadata, scenes: &[u64]) -> Result<()> {
    let mut document = match serde_json::to_value(metadata) {
        Ok(Value::Object(document)) => document,
        Ok(_) => Document::new(),
        Err(e) => return Err(write_failed(path, io::Error::other(e))),
    };
    document.insert(SCENES_KEY.to_string(), Value::from(scenes.to_vec()));

    write_document(path, &document)
}

/// 先寫入同資料夾的暫存檔再取代原檔，失敗時原本的側車檔不受影響
fn write_document(path: &Path, document: &Document) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)
        .map_err(|e| write_failed(path, io::Error::other(e)))?;
    content.push('\n');

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(directory).map_err(|e| write_failed(path, e))?;
    temp_file
        .write_all(content.as_bytes())
        .and_then(|()| temp_file.as_file().sync_all())
        .map_err(|e| write_failed(path, e))?;

    // 沿用原檔權限，避免被暫存檔的權限取代
    if let Ok(existing) = fs::metadata(path)
        && let Err(e) = fs::set_permissions(temp_file.path(), existing.permissions())
    {
        warn!("無法沿用側車檔權限 {}: {e}", path.display());
    }

    temp_file
        .persist(path)
        .map_err(|e| write_failed(path, e.error))?;

    debug!("已寫入側車檔: {}", path.display());
    Ok(())
}

fn malformed(path: &Path, reason: String) -> ReviewError {
    ReviewError::MalformedJson {
        path: path.to_path_buf(),
        reason,
    }
}

fn write_failed(path: &Path, source: io::Error) -> ReviewError {
    ReviewError::WriteFailed {
        path: PathBuf::from(path),
        source,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn video_in(dir: &TempDir) -> PathBuf {
        dir.path().join("movie.mp4")
    }

    fn sidecar_in(dir: &TempDir) -> PathBuf {
        dir.path().join("movie.json")
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        let metadata = VideoMetadata {
            title: "Harbor".to_string(),
            url: "https://example.com/harbor".to_string(),
            image_path: "harbor.jpg".to_string(),
            description: "Boats\nand gulls".to_string(),
            md5sum: "0123456789abcdef0123456789abcdef".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 6, 1),
            actors: vec!["  Jane Doe ".to_string(), "John Smith".to_string()],
            categories: vec!["Documentary".to_string(), "Documentary".to_string()],
        };

        save(&video, &metadata).unwrap();
        let loaded = load(&video).unwrap();

        assert_eq!(loaded.actors, vec!["Jane Doe", "John Smith"]);
        assert_eq!(loaded.categories, vec!["Documentary", "Documentary"]);
        assert_eq!(
            loaded,
            VideoMetadata {
                actors: vec!["Jane Doe".to_string(), "John Smith".to_string()],
                ..metadata
            }
        );
    }

    #[test]
    fn test_load_missing_sidecar() {
        let dir = TempDir::new().unwrap();
        let err = load(&video_in(&dir)).unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(ref p) if *p == sidecar_in(&dir)));
        assert_eq!(load_or_default(&video_in(&dir)), VideoMetadata::default());
    }

    #[test]
    fn test_load_rejects_non_mp4() {
        let err = load(Path::new("/videos/movie.mov")).unwrap_err();
        assert!(matches!(err, ReviewError::NotAVideoFile(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        for content in ["{ not json", "[1, 2, 3]", ""] {
            fs::write(sidecar_in(&dir), content).unwrap();
            let err = load(&video_in(&dir)).unwrap_err();
            assert!(matches!(err, ReviewError::MalformedJson { .. }), "{content}");
            assert_eq!(load_or_default(&video_in(&dir)), VideoMetadata::default());
        }
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = TempDir::new().unwrap();
        fs::write(
            sidecar_in(&dir),
            r#"{"title": "Old", "url": "keep?", "extra": true}"#,
        )
        .unwrap();

        let metadata = VideoMetadata {
            title: "New".to_string(),
            ..VideoMetadata::default()
        };
        save(&video_in(&dir), &metadata).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(sidecar_in(&dir)).unwrap()).unwrap();
        assert_eq!(written["title"], "New");
        assert_eq!(written["url"], "");
        assert!(written.get("extra").is_none());
        assert_eq!(written[SCENES_KEY], json!([]));
    }

    #[test]
    fn test_scenes_survive_metadata_save() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);

        save_scenes(&video, &[9000, 5000, 9000]).unwrap();
        save(
            &video,
            &VideoMetadata {
                title: "With scenes".to_string(),
                ..VideoMetadata::default()
            },
        )
        .unwrap();

        assert_eq!(load_scenes(&video).unwrap(), vec![9000, 5000, 9000]);
        assert_eq!(load(&video).unwrap().title, "With scenes");
    }

    #[test]
    fn test_metadata_survives_scene_save() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        let metadata = VideoMetadata {
            title: "Keep me".to_string(),
            categories: vec!["Travel".to_string()],
            ..VideoMetadata::default()
        };

        save(&video, &metadata).unwrap();
        save_scenes(&video, &[1234]).unwrap();

        assert_eq!(load(&video).unwrap(), metadata);
        assert_eq!(load_scenes(&video).unwrap(), vec![1234]);
    }

    #[test]
    fn test_load_scenes_skips_invalid_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(sidecar_in(&dir), r#"{"scenes": [100, -5, "x", 2.5, 300]}"#).unwrap();
        assert_eq!(load_scenes(&video_in(&dir)).unwrap(), vec![100, 300]);

        fs::write(sidecar_in(&dir), r#"{"title": "no scenes"}"#).unwrap();
        assert!(load_scenes(&video_in(&dir)).unwrap().is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("missing").join("movie.mp4");

        let err = save(&video, &VideoMetadata::default()).unwrap_err();
        assert!(matches!(err, ReviewError::WriteFailed { .. }));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_save_scenes_over_malformed_sidecar() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        fs::write(sidecar_in(&dir), "{ not json").unwrap();

        save_scenes(&video, &[4000, 1500]).unwrap();

        assert_eq!(load_scenes(&video).unwrap(), vec![4000, 1500]);
        assert_eq!(load(&video).unwrap(), VideoMetadata::default());
    }

    #[test]
    fn test_save_over_malformed_sidecar_drops_scenes() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        fs::write(sidecar_in(&dir), "[4000]").unwrap();

        let metadata = VideoMetadata {
            title: "Recovered".to_string(),
            ..VideoMetadata::default()
        };
        save(&video, &metadata).unwrap();

        assert_eq!(load(&video).unwrap(), metadata);
        assert!(load_scenes(&video).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_sidecar_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        save(&video, &VideoMetadata::default()).unwrap();
        fs::set_permissions(sidecar_in(&dir), fs::Permissions::from_mode(0o640)).unwrap();

        save_scenes(&video, &[2000]).unwrap();

        let mode = fs::metadata(sidecar_in(&dir)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_failed_write_keeps_previous_sidecar() {
        let dir = TempDir::new().unwrap();
        let video = video_in(&dir);
        save(
            &video,
            &VideoMetadata {
                title: "Original".to_string(),
                ..VideoMetadata::default()
            },
        )
        .unwrap();

        // 側車檔路徑被資料夾佔用時無法取代
        let blocked = dir.path().join("blocked.json");
        fs::create_dir(&blocked).unwrap();
        let err = save(&dir.path().join("blocked.mp4"), &VideoMetadata::default()).unwrap_err();
        assert!(matches!(err, ReviewError::WriteFailed { .. }));
        assert!(blocked.is_dir());

        assert_eq!(load(&video).unwrap().title, "Original");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2, "不應留下暫存檔");
    }
}
