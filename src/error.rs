use std::path::PathBuf;
use thiserror::Error;

/// 側車檔、場景標記與截圖請求的錯誤類型
///
/// 這裡的錯誤都不是致命錯誤：讀取失敗可退回預設值，
/// 其餘則是被拒絕的操作，交由呼叫端決定如何呈現。
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("不是 .mp4 影片檔: {}", .0.display())]
    NotAVideoFile(PathBuf),

    #[error("找不到側車檔: {}", .0.display())]
    NotFound(PathBuf),

    #[error("無法讀取側車檔 {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("側車檔不是有效的 JSON 物件 {}: {reason}", path.display())]
    MalformedJson { path: PathBuf, reason: String },

    #[error("無法寫入側車檔 {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("場景索引超出範圍: {index}（共 {len} 個場景）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("播放位置 {0} ms 太早，截圖需超過 1000 ms")]
    PositionTooEarly(u64),

    #[error("播放位置不可為負數: {0} ms")]
    NegativePosition(i64),

    #[error("無法啟動截圖程式 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReviewError {
    /// 側車檔尚未存在或無法開啟，呼叫端應視為「尚無資料」
    #[must_use]
    pub const fn is_missing_sidecar(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Unreadable { .. })
    }

    /// 使用者的操作被拒絕（而非檔案或程序錯誤）
    #[must_use]
    pub const fn is_declined_operation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::PositionTooEarly(_) | Self::NegativePosition(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
