use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 最近開啟影片的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 使用者設定檔名稱（位於目前工作目錄）
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    English,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::English, Self::TraditionalChinese];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::TraditionalChinese => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::TraditionalChinese => write!(f, "繁體中文"),
        }
    }
}

/// 截圖程式設定
///
/// 呼叫方式固定為 `<program> -y -ss <秒.毫秒> -i <影片> -vframes 1 -q:v <quality> <影片>.jpg`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameExtractorSettings {
    pub program: String,
    pub quality: u8,
}

impl Default for FrameExtractorSettings {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            quality: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    /// 最近開啟的影片，最新的在最前面
    pub recent_videos: Vec<PathBuf>,
    /// 上次瀏覽的資料夾
    pub last_directory: Option<PathBuf>,
    pub frame_extractor: FrameExtractorSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
    /// 設定檔位置，預設為工作目錄下的 `settings.json`
    pub settings_path: PathBuf,
}
