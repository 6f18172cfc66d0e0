use super::marker::SceneMarker;
use crate::component::sidecar_store;
use crate::error::{ReviewError, Result};
use log::debug;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Empty,
    Populated,
}

/// 影片的場景標記清單
///
/// 依加入順序保存，不排序也不去除重複位置。
/// 畫面每次變更後都應從 `markers()` 重新產生清單。
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    markers: Vec<SceneMarker>,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 由已儲存的位置建立清單（識別碼重新產生）
    #[must_use]
    pub fn from_positions(positions: &[u64]) -> Self {
        Self {
            markers: positions.iter().copied().map(SceneMarker::new).collect(),
        }
    }

    /// 從側車檔讀取場景標記
    pub fn load(video_path: &Path) -> Result<Self> {
        let positions = sidecar_store::load_scenes(video_path)?;
        Ok(Self::from_positions(&positions))
    }

    #[must_use]
    pub fn state(&self) -> RegistryState {
        if self.markers.is_empty() {
            RegistryState::Empty
        } else {
            RegistryState::Populated
        }
    }

    /// 在指定位置新增場景，永遠成功
    pub fn add_scene(&mut self, position_ms: u64) -> Uuid {
        let marker = SceneMarker::new(position_ms);
        let id = marker.id;
        self.markers.push(marker);
        debug!("新增場景 #{} @ {position_ms} ms", self.markers.len() - 1);
        id
    }

    /// 刪除指定索引的場景，之後的索引往前移一位
    pub fn delete_scene(&mut self, index: usize) -> Result<SceneMarker> {
        self.check_index(index)?;
        let marker = self.markers.remove(index);
        debug!("刪除場景 #{index} @ {} ms", marker.position_ms);
        Ok(marker)
    }

    pub fn delete_scene_by_id(&mut self, id: Uuid) -> Option<SceneMarker> {
        let index = self.index_of(id)?;
        Some(self.markers.remove(index))
    }

    /// 取得場景位置供播放器跳轉，本身不移動播放位置
    pub fn jump_to_scene(&self, index: usize) -> Result<u64> {
        self.check_index(index)?;
        Ok(self.markers[index].position_ms)
    }

    /// 將目前的場景標記寫入側車檔
    pub fn save_scenes(&self, video_path: &Path) -> Result<()> {
        sidecar_store::save_scenes(video_path, &self.positions())
    }

    #[must_use]
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    #[must_use]
    pub fn markers(&self) -> &[SceneMarker] {
        &self.markers
    }

    #[must_use]
    pub fn positions(&self) -> Vec<u64> {
        self.markers.iter().map(|m| m.position_ms).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.markers.len() {
            return Err(ReviewError::IndexOutOfRange {
                index,
                len: self.markers.len(),
            });
        }
        Ok(())
    }
}
