use crate::component::frame_extractor::{
    ExtractionHandle, ExtractionStatus, request_screenshot, spawn_extraction,
};
use crate::component::scene_registry::{SceneMarker, SceneRegistry};
use crate::component::sidecar_store::{self, VideoMetadata};
use crate::config::FrameExtractorSettings;
use crate::error::Result;
use crate::tools::{VideoInfo, get_video_info, sidecar_path};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::thread;
use uuid::Uuid;

/// 已結束的截圖程序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedExtraction {
    pub output_path: PathBuf,
    pub status: ExtractionStatus,
}

/// 一部已開啟影片的編輯狀態
///
/// 持有描述資料、場景標記與目前播放位置。播放位置由使用者設定，
/// 並限制在 `0..=影片長度` 之內（長度未知時只限制下界）。
#[derive(Debug)]
pub struct ReviewSession {
    video_path: PathBuf,
    duration_ms: Option<u64>,
    /// 影片解析度（寬, 高），ffprobe 未提供時為 `None`
    resolution: Option<(u32, u32)>,
    position_ms: u64,
    metadata: VideoMetadata,
    has_sidecar: bool,
    scenes: SceneRegistry,
    extractor: FrameExtractorSettings,
    extractions: Vec<ExtractionHandle>,
    metadata_dirty: bool,
    scenes_dirty: bool,
}

impl ReviewSession {
    /// 開啟影片：以 ffprobe 取得長度，並讀取側車檔
    pub fn open(video_path: &Path, extractor: FrameExtractorSettings) -> Result<Self> {
        // 先確認副檔名，避免對非影片檔執行 ffprobe
        sidecar_path(video_path)?;

        match get_video_info(video_path) {
            Ok(info) => Self::with_video_info(video_path, info, extractor),
            Err(e) => {
                warn!("無法取得影片長度，播放位置不設上限: {e:#}");
                Self::with_duration(video_path, None, extractor)
            }
        }
    }

    /// 以 ffprobe 的結果開啟，保留長度與解析度
    pub fn with_video_info(
        video_path: &Path,
        info: VideoInfo,
        extractor: FrameExtractorSettings,
    ) -> Result<Self> {
        let mut session = Self::with_duration(video_path, Some(info.duration_ms), extractor)?;
        session.resolution = info.width.zip(info.height);
        Ok(session)
    }

    /// 以已知的影片長度開啟（不呼叫 ffprobe）
    pub fn with_duration(
        video_path: &Path,
        duration_ms: Option<u64>,
        extractor: FrameExtractorSettings,
    ) -> Result<Self> {
        let sidecar = sidecar_path(video_path)?;
        let has_sidecar = sidecar.is_file();

        let metadata = sidecar_store::load_or_default(video_path);
        let scenes = match SceneRegistry::load(video_path) {
            Ok(scenes) => scenes,
            Err(e) if e.is_missing_sidecar() => SceneRegistry::new(),
            Err(e) => {
                warn!("無法讀取場景標記: {e}");
                SceneRegistry::new()
            }
        };

        info!(
            "開啟影片: {}（{} 個場景）",
            video_path.display(),
            scenes.len()
        );

        Ok(Self {
            video_path: video_path.to_path_buf(),
            duration_ms,
            resolution: None,
            position_ms: 0,
            metadata,
            has_sidecar,
            scenes,
            extractor,
            extractions: Vec::new(),
            metadata_dirty: false,
            scenes_dirty: false,
        })
    }

    #[must_use]
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    #[must_use]
    pub const fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    #[must_use]
    pub const fn resolution(&self) -> Option<(u32, u32)> {
        self.resolution
    }

    #[must_use]
    pub const fn position_ms(&self) -> u64 {
        self.position_ms
    }

    #[must_use]
    pub const fn has_sidecar(&self) -> bool {
        self.has_sidecar
    }

    #[must_use]
    pub const fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// 取得可修改的描述資料，並標記為尚未儲存
    pub fn metadata_mut(&mut self) -> &mut VideoMetadata {
        self.metadata_dirty = true;
        &mut self.metadata
    }

    #[must_use]
    pub const fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.metadata_dirty || self.scenes_dirty
    }

    /// 設定播放位置，回傳限制範圍後的實際位置
    pub fn set_position(&mut self, position_ms: u64) -> u64 {
        self.position_ms = self
            .duration_ms
            .map_or(position_ms, |duration| position_ms.min(duration));
        self.position_ms
    }

    pub fn add_scene_at_current(&mut self) -> Uuid {
        self.scenes_dirty = true;
        self.scenes.add_scene(self.position_ms)
    }

    pub fn delete_scene(&mut self, index: usize) -> Result<SceneMarker> {
        let marker = self.scenes.delete_scene(index)?;
        self.scenes_dirty = true;
        Ok(marker)
    }

    /// 跳到指定場景，播放位置改為該場景的位置
    pub fn jump_to_scene(&mut self, index: usize) -> Result<u64> {
        let position = self.scenes.jump_to_scene(index)?;
        Ok(self.set_position(position))
    }

    pub fn save_metadata(&mut self) -> Result<()> {
        sidecar_store::save(&self.video_path, &self.metadata)?;
        // 重新讀回，讓畫面顯示寫入後的內容（清單項目已去除空白）
        self.metadata = sidecar_store::load_or_default(&self.video_path);
        self.metadata_dirty = false;
        self.has_sidecar = true;
        Ok(())
    }

    pub fn save_scenes(&mut self) -> Result<()> {
        self.scenes.save_scenes(&self.video_path)?;
        self.scenes_dirty = false;
        self.has_sidecar = true;
        Ok(())
    }

    /// 在目前播放位置截圖，回傳截圖輸出路徑
    ///
    /// 只負責啟動外部程式，不等待完成。
    pub fn request_screenshot(&mut self) -> Result<PathBuf> {
        let spec = request_screenshot(&self.video_path, self.position_ms, &self.extractor)?;
        let handle = spawn_extraction(&spec)?;
        let output_path = handle.output_path().to_path_buf();
        self.extractions.push(handle);
        Ok(output_path)
    }

    #[must_use]
    pub fn pending_extractions(&self) -> usize {
        self.extractions.len()
    }

    /// 回收已結束的截圖程序
    pub fn poll_extractions(&mut self) -> Vec<FinishedExtraction> {
        let mut finished = Vec::new();
        self.extractions.retain_mut(|handle| match handle.try_status() {
            ExtractionStatus::Running => true,
            status => {
                log_outcome(handle.output_path(), status);
                finished.push(FinishedExtraction {
                    output_path: handle.output_path().to_path_buf(),
                    status,
                });
                false
            }
        });
        finished
    }

    /// 阻塞等待所有仍在執行的截圖程序
    pub fn wait_extractions(&mut self) -> Vec<FinishedExtraction> {
        self.extractions
            .drain(..)
            .map(|mut handle| {
                let status = handle.wait();
                log_outcome(handle.output_path(), status);
                FinishedExtraction {
                    output_path: handle.output_path().to_path_buf(),
                    status,
                }
            })
            .collect()
    }

    /// 將仍在執行的截圖程序交給背景執行緒等待結束，回傳交出的數量
    pub fn release_extractions(&mut self) -> usize {
        let handles = std::mem::take(&mut self.extractions);
        let count = handles.len();
        if count > 0 {
            debug!("背景等待 {count} 個截圖程序結束");
            thread::spawn(move || {
                for mut handle in handles {
                    let status = handle.wait();
                    log_outcome(handle.output_path(), status);
                }
            });
        }
        count
    }
}

impl Drop for ReviewSession {
    fn drop(&mut self) {
        self.release_extractions();
    }
}

fn log_outcome(output_path: &Path, status: ExtractionStatus) {
    match status {
        ExtractionStatus::Succeeded => info!("截圖完成: {}", output_path.display()),
        _ => warn!("截圖失敗 {status:?}: {}", output_path.display()),
    }
}
