//! 場景標記元件

mod marker;
mod registry;

pub use marker::SceneMarker;
pub use registry::{RegistryState, SceneRegistry};
