use uuid::Uuid;

/// 場景標記：影片中使用者標記的一個播放位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneMarker {
    /// 穩定識別碼，刪除其他標記後也不會改變
    pub id: Uuid,
    /// 播放位置（毫秒）
    pub position_ms: u64,
}

impl SceneMarker {
    #[must_use]
    pub fn new(position_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position_ms,
        }
    }
}
