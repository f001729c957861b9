//! wgpu render backend for the lit cube.
//!
//! Acquires a device, builds the one pipeline, uploads the fixed mesh and
//! draws a [`FramePlan`](litcube_render::FramePlan) either into a window
//! surface or into an offscreen texture that can be read back.
//!
//! # Invariants
//! - Shader or pipeline validation failures are logged, never raised.
//! - Context acquisition failures are returned; callers log and skip drawing.
//! - The vertex buffer is immutable after creation.

mod context;
mod error;
mod gpu;
mod offscreen;
mod shaders;

pub use context::{GpuContext, configure_surface, create_instance};
pub use error::GpuError;
pub use gpu::CubeRenderer;
pub use offscreen::{Capture, OFFSCREEN_FORMAT, padded_bytes_per_row, render_offscreen};
pub use shaders::CUBE_SHADER;
