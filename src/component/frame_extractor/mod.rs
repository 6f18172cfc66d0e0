//! 截圖請求元件
//!
//! 將播放位置轉成外部截圖程式（預設 ffmpeg）的呼叫參數，並在背景啟動。

mod invocation;
mod process;

pub use invocation::{InvocationSpec, MIN_SCREENSHOT_POSITION_MS, request_screenshot};
pub use process::{ExtractionHandle, ExtractionStatus, spawn_extraction};
