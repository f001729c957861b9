use crate::frame::{FramePlan, PrimitiveMode};
use glam::{Mat4, Vec3};

/// Renderer-agnostic interface. A renderer consumes a frame plan and produces
/// some output; it never alters the plan.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the single frame described by `plan`.
    fn render(&self, plan: &FramePlan) -> Self::Output;
}

/// Renders the frame plan as a readable trace of the calls a GPU backend
/// makes, in order. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn write_vec3(out: &mut String, name: &str, v: Vec3) {
    out.push_str(&format!("  {name} = ({:.4}, {:.4}, {:.4})\n", v.x, v.y, v.z));
}

fn write_mat4(out: &mut String, name: &str, m: &Mat4) {
    out.push_str(&format!("  {name} =\n"));
    // Print rows so the matrix reads the way it is written on paper.
    for row in 0..4 {
        let r = m.row(row);
        out.push_str(&format!(
            "    [{:>8.4} {:>8.4} {:>8.4} {:>8.4}]\n",
            r.x, r.y, r.z, r.w
        ));
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, plan: &FramePlan) -> String {
        let mut out = String::new();
        let vp = &plan.viewport;
        let c = &plan.clear_color;
        let u = &plan.uniforms;

        out.push_str(&format!(
            "=== Frame ({}x{}, aspect={:.4}) ===\n",
            vp.width,
            vp.height,
            vp.aspect()
        ));
        out.push_str(&format!(
            "viewport {} {} {} {}\n",
            vp.x, vp.y, vp.width, vp.height
        ));
        out.push_str(&format!(
            "clear color=({:.2}, {:.2}, {:.2}, {:.2}) depth=1.0\n",
            c.r, c.g, c.b, c.a
        ));
        out.push_str("uniforms:\n");
        write_mat4(&mut out, "projection_y", &u.projection_y);
        write_mat4(&mut out, "projection_z", &u.projection_z);
        write_mat4(&mut out, "perspective", &u.perspective);
        write_mat4(&mut out, "model_view", &u.model_view);
        write_vec3(&mut out, "ambient_color", u.ambient_color);
        write_vec3(&mut out, "light_color", u.light_color);
        write_vec3(&mut out, "light_direction", u.light_direction);

        let mode = match plan.draw.mode {
            PrimitiveMode::Triangles => "triangles",
        };
        out.push_str(&format!(
            "draw mode={mode} first={} count={} indexed={}\n",
            plan.draw.first_vertex, plan.draw.vertex_count, plan.draw.indexed
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litcube_common::SceneConfig;

    fn plan() -> FramePlan {
        FramePlan::new(&SceneConfig::default(), 640, 480).unwrap()
    }

    #[test]
    fn debug_renderer_reports_single_draw() {
        let output = DebugTextRenderer::new().render(&plan());
        assert!(output.contains("draw mode=triangles first=0 count=36 indexed=false"));
        assert_eq!(output.matches("draw ").count(), 1);
    }

    #[test]
    fn debug_renderer_orders_clear_before_draw() {
        let output = DebugTextRenderer::new().render(&plan());
        let clear = output.find("clear color=(0.00, 0.00, 0.00, 1.00)").unwrap();
        let uniforms = output.find("uniforms:").unwrap();
        let draw = output.find("draw mode=").unwrap();
        assert!(clear < uniforms && uniforms < draw);
    }

    #[test]
    fn debug_renderer_lists_every_uniform() {
        let output = DebugTextRenderer::new().render(&plan());
        for name in [
            "projection_y",
            "projection_z",
            "perspective",
            "model_view",
            "ambient_color",
            "light_color",
            "light_direction",
        ] {
            assert!(output.contains(&format!("  {name} =")), "missing {name}");
        }
        assert!(output.contains("viewport 0 0 640 480"));
    }

    #[test]
    fn debug_renderer_emits_one_line_per_step() {
        let output = DebugTextRenderer::new().render(&plan());
        // header, viewport, clear, "uniforms:", 4 matrices x 5 lines, 3 vectors, draw
        assert_eq!(output.lines().count(), 4 + 4 * 5 + 3 + 1);
        assert!(output.ends_with('\n'));
        assert_eq!(output.matches("    [").count(), 16);
    }
}
