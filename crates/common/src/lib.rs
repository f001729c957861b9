//! Shared scene parameters for the lit cube renderer.
//!
//! Everything here is plain data. The values in [`SceneConfig::default`] are
//! the only scene the renderer ever draws; nothing mutates them after startup.

mod types;

pub use types::{ClearColor, Lighting, SceneConfig, ViewParams};
