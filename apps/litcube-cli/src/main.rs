use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use litcube_common::SceneConfig;
use litcube_render::mesh::{self, FACE_COUNT};
use litcube_render::{DebugTextRenderer, FramePlan, FrameUniforms, Renderer};
use litcube_render_wgpu::{GpuContext, render_offscreen};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "litcube-cli", about = "Inspect and render the lit cube frame")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the host-computed matrices and lighting uniforms
    Uniforms {
        /// Surface aspect ratio (width / height)
        #[arg(short, long, default_value_t = 4.0 / 3.0, value_parser = parse_aspect)]
        aspect: f32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the 36-vertex mesh grouped by face
    Mesh,
    /// Print the frame's call sequence without touching a GPU
    Plan {
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
    },
    /// Draw the frame offscreen and write it as PNG
    Render {
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Output image path
        #[arg(short, long, default_value = "cube.png")]
        output: PathBuf,
    },
}

/// Aspect ratios must be finite and positive, or the projection degenerates.
fn parse_aspect(s: &str) -> Result<f32, String> {
    let aspect: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(format!("aspect must be finite and positive, got {aspect}"))
    }
}

const FACE_NAMES: [&str; FACE_COUNT] = ["-X", "+X", "-Y", "+Y", "-Z", "+Z"];

fn print_mesh() {
    println!(
        "{} vertices, {} floats, stride {} bytes",
        mesh::VERTEX_COUNT,
        mesh::cube_floats().len(),
        mesh::VERTEX_STRIDE
    );
    for (name, verts) in FACE_NAMES.iter().zip(mesh::faces()) {
        println!("face {name}");
        for v in verts {
            let [px, py, pz] = v.position;
            let [nx, ny, nz] = v.normal;
            println!("  pos=({px:>5.2}, {py:>5.2}, {pz:>5.2})  normal=({nx:>4.1}, {ny:>4.1}, {nz:>4.1})");
        }
    }
}

fn print_uniforms(aspect: f32, json: bool) -> Result<()> {
    let uniforms = FrameUniforms::compute(&SceneConfig::default(), aspect);
    if json {
        println!("{}", serde_json::to_string_pretty(&uniforms)?);
        return Ok(());
    }

    for (name, m) in [
        ("projection_y", uniforms.projection_y),
        ("projection_z", uniforms.projection_z),
        ("perspective", uniforms.perspective),
        ("model_view", uniforms.model_view),
    ] {
        println!("{name} (column-major): {:?}", m.to_cols_array());
    }
    println!("ambient_color: {}", uniforms.ambient_color);
    println!("light_color: {}", uniforms.light_color);
    println!("light_direction: {}", uniforms.light_direction);
    Ok(())
}

fn render_png(width: u32, height: u32, output: &PathBuf) -> Result<()> {
    let plan = FramePlan::new(&SceneConfig::default(), width, height)?;
    let ctx = GpuContext::headless().context("acquire headless GPU context")?;
    let capture = render_offscreen(&ctx, &plan).context("render offscreen frame")?;

    let image = image::RgbaImage::from_raw(capture.width, capture.height, capture.pixels)
        .context("captured frame has the wrong size")?;
    image
        .save(output)
        .with_context(|| format!("write {}", output.display()))?;

    tracing::info!(path = %output.display(), width, height, "frame written");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            println!("litcube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", litcube_render::crate_info());
            let draw = litcube_render::DrawCall::cube();
            println!(
                "draw: {} vertices, {} triangles, indexed={}",
                draw.vertex_count,
                draw.triangle_count(),
                draw.indexed
            );
        }
        Commands::Uniforms { aspect, json } => print_uniforms(aspect, json)?,
        Commands::Mesh => print_mesh(),
        Commands::Plan { width, height } => {
            let plan = FramePlan::new(&SceneConfig::default(), width, height)?;
            print!("{}", DebugTextRenderer::new().render(&plan));
        }
        Commands::Render {
            width,
            height,
            output,
        } => render_png(width, height, &output)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_command() {
        let cli = Cli::try_parse_from(["litcube-cli", "render", "--width", "64", "-o", "out.png"])
            .unwrap();
        match cli.command {
            Commands::Render {
                width,
                height,
                output,
            } => {
                assert_eq!(width, 64);
                assert_eq!(height, 600);
                assert_eq!(output, PathBuf::from("out.png"));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn aspect_must_be_finite_and_positive() {
        for bad in ["0", "-1.5", "NaN", "inf"] {
            assert!(
                Cli::try_parse_from(["litcube-cli", "uniforms", "--aspect", bad]).is_err(),
                "accepted {bad}"
            );
        }
        assert!(parse_aspect("-1.5").is_err());
        assert!(parse_aspect("NaN").is_err());
        assert_eq!(parse_aspect("2"), Ok(2.0));

        let cli = Cli::try_parse_from(["litcube-cli", "uniforms", "--aspect", "1.5"]).unwrap();
        assert!(matches!(cli.command, Commands::Uniforms { aspect, .. } if aspect == 1.5));
    }

    #[test]
    fn uniforms_json_has_shader_names() {
        let uniforms = FrameUniforms::compute(&SceneConfig::default(), 1.0);
        let json = serde_json::to_value(uniforms).unwrap();
        assert_eq!(json["perspective"].as_array().map(Vec::len), Some(16));
        assert_eq!(json["model_view"][14], serde_json::json!(-3.5));
    }

    #[test]
    fn zero_height_plan_is_an_error() {
        assert!(FramePlan::new(&SceneConfig::default(), 10, 0).is_err());
    }
}
