mod ffprobe_info;
mod path_deriver;
mod path_validator;
mod text_list;
mod timecode;
mod video_scanner;

pub use ffprobe_info::{VideoInfo, get_video_info};
pub use path_deriver::{
    SCREENSHOT_SUFFIX, SIDECAR_SUFFIX, VIDEO_SUFFIX, is_mp4_file, screenshot_path, sidecar_path,
};
pub use path_validator::{validate_directory_exists, validate_video_file};
pub use text_list::{join_list, simplify, split_list, trim_entries};
pub use timecode::{format_clock, parse_clock, seek_time_from_signed, to_seek_time};
pub use video_scanner::{VideoFileInfo, scan_video_files};
