//! 影片審閱元件
//!
//! 開啟單一影片，編輯側車檔描述資料、標記場景並請求截圖

mod main;
mod session;

pub use main::VideoReviewer;
pub use session::{FinishedExtraction, ReviewSession};
