pub mod load;
pub mod save;
pub mod types;

pub use save::{add_recent_video, save_settings};
pub use types::{
    Config, FrameExtractorSettings, Language, MAX_RECENT_PATHS, SETTINGS_FILE, UserSettings,
};
