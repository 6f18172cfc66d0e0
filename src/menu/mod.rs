mod handlers;
mod main_menu;

pub use handlers::run_video_reviewer;
pub use main_menu::show_main_menu;
