//! Rendering Adapter: everything about the lit cube that does not touch a GPU.
//!
//! # Invariants
//! - The mesh is 36 vertices, six per face, and never changes.
//! - Matrices are column-major and use OpenGL clip space.
//! - A frame is exactly one non-indexed triangle draw.
//!
//! GPU backends consume a [`FramePlan`]; the [`DebugTextRenderer`] renders the
//! same plan to text so the draw sequence can be inspected without a device.

mod error;
mod frame;
pub mod mesh;
mod renderer;
pub mod transform;

pub use error::RenderError;
pub use frame::{DrawCall, FramePlan, FrameUniforms, PrimitiveMode, Viewport};
pub use mesh::Vertex;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "litcube-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
