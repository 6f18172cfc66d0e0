//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod frame_extractor;
pub mod scene_registry;
pub mod sidecar_store;
pub mod video_reviewer;

pub use scene_registry::{SceneMarker, SceneRegistry};
pub use sidecar_store::VideoMetadata;
pub use video_reviewer::{ReviewSession, VideoReviewer};
