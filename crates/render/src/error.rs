/// Errors from building a frame plan.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface has no area: {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}
