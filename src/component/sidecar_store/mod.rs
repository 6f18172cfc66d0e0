//! 側車檔存取元件
//!
//! 影片 `movie.mp4` 的描述資料與場景標記存放在同資料夾的 `movie.json`。

mod metadata;
mod store;

pub use metadata::{RELEASE_DATE_FORMAT, VideoMetadata, format_release_date, parse_release_date};
pub use store::{SCENES_KEY, load, load_or_default, load_scenes, save, save_scenes};
