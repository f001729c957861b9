/// Errors from acquiring a GPU context or reading a frame back.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("{width}x{height} frame exceeds the device limit of {max} pixels per side")]
    FrameTooLarge { width: u32, height: u32, max: u32 },
    #[error("GPU validation failed: {0}")]
    Validation(String),
    #[error("failed to map readback buffer: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),
    #[error("readback finished without reporting a result")]
    ReadbackAborted,
    #[error(transparent)]
    Plan(#[from] litcube_render::RenderError),
}
