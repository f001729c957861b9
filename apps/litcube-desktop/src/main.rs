use anyhow::{Context, Result};
use clap::Parser;
use litcube_common::SceneConfig;
use litcube_render::FramePlan;
use litcube_render_wgpu::{CubeRenderer, GpuContext, GpuError, configure_surface, create_instance};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser, Debug)]
#[command(name = "litcube-desktop", about = "Draw a directionally lit cube once")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Drawable width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Drawable height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

/// Surface and renderer, alive until the process exits.
struct GpuState {
    surface: wgpu::Surface<'static>,
    ctx: GpuContext,
    config: wgpu::SurfaceConfiguration,
    renderer: CubeRenderer,
}

impl GpuState {
    fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let instance = create_instance();
        let surface = instance.create_surface(window)?;
        let ctx = GpuContext::request(&instance, Some(&surface))?;
        let config = configure_surface(&ctx, &surface, size.width, size.height)?;
        let renderer = CubeRenderer::new(&ctx.device, config.format);

        Ok(Self {
            surface,
            ctx,
            config,
            renderer,
        })
    }

    fn draw(&self, scene: &SceneConfig) {
        let plan = match FramePlan::new(scene, self.config.width, self.config.height) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!("cannot plan frame: {e}");
                return;
            }
        };

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .draw(&self.ctx.device, &self.ctx.queue, &view, &plan);
        output.present();
    }
}

struct CubeApp {
    scene: SceneConfig,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    drawn: bool,
}

impl CubeApp {
    fn new(scene: SceneConfig, size: PhysicalSize<u32>) -> Self {
        Self {
            scene,
            size,
            window: None,
            gpu: None,
            drawn: false,
        }
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("litcube")
            .with_inner_size(self.size)
            .with_resizable(false);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        // No context means no draw; the window stays up empty.
        match GpuState::new(window.clone()) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => tracing::error!("failed to get GPU context: {e}"),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if self.drawn {
                    return;
                }
                if let Some(gpu) = &self.gpu {
                    gpu.draw(&self.scene);
                }
                self.drawn = true;
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let event_loop = EventLoop::new().context("create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = CubeApp::new(
        SceneConfig::default(),
        PhysicalSize::new(cli.width, cli.height),
    );
    event_loop.run_app(&mut app).context("run event loop")?;

    Ok(())
}
