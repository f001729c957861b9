use crate::context::GpuContext;
use crate::error::GpuError;
use crate::gpu::CubeRenderer;
use litcube_render::FramePlan;

/// Color format of offscreen frames. Unorm, so pixels hold shader output as-is.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const BYTES_PER_PIXEL: u32 = 4;

/// A frame read back from the GPU as tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Capture {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * BYTES_PER_PIXEL) as usize;
        self.pixels.get(i..i + 4)?.try_into().ok()
    }
}

/// Row pitch for texture-to-buffer copies, rounded up to wgpu's alignment.
/// `None` when the pitch does not fit in a `u32`.
pub fn padded_bytes_per_row(width: u32) -> Option<u32> {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    width
        .checked_mul(BYTES_PER_PIXEL)?
        .div_ceil(align)
        .checked_mul(align)
}

fn check_extent(width: u32, height: u32, max: u32) -> Result<(), GpuError> {
    if width > max || height > max {
        return Err(GpuError::FrameTooLarge { width, height, max });
    }
    Ok(())
}

fn unpad_rows(data: &[u8], width: u32, height: u32, padded: u32) -> Vec<u8> {
    let row = (width * BYTES_PER_PIXEL) as usize;
    data.chunks(padded as usize)
        .take(height as usize)
        .flat_map(|chunk| &chunk[..row])
        .copied()
        .collect()
}

/// Builds the cube program against an offscreen target, draws `plan` once,
/// and reads the color target back.
pub fn render_offscreen(ctx: &GpuContext, plan: &FramePlan) -> Result<Capture, GpuError> {
    let device = &ctx.device;
    let (width, height) = (plan.viewport.width, plan.viewport.height);
    let max = device.limits().max_texture_dimension_2d;
    check_extent(width, height, max)?;
    let padded =
        padded_bytes_per_row(width).ok_or(GpuError::FrameTooLarge { width, height, max })?;

    // Anything invalid from here to the copy is an error, not an empty image.
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen_color"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OFFSCREEN_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&Default::default());

    let renderer = CubeRenderer::new(device, OFFSCREEN_FORMAT);
    renderer.draw(device, &ctx.queue, &view, plan);

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("offscreen_readback"),
        size: u64::from(padded) * u64::from(height),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("readback_encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    ctx.queue.submit(std::iter::once(encoder.finish()));

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        tracing::error!("offscreen frame failed validation: {err}");
        return Err(GpuError::Validation(err.to_string()));
    }

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);
    rx.recv().map_err(|_| GpuError::ReadbackAborted)??;

    let pixels = {
        let data = slice.get_mapped_range();
        unpad_rows(&data, width, height, padded)
    };
    readback.unmap();
    tracing::debug!(width, height, bytes = pixels.len(), "offscreen frame read back");

    Ok(Capture {
        width,
        height,
        pixels,
    })
}
