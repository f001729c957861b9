use crate::error::RenderError;
use crate::mesh;
use crate::transform;
use glam::{Mat4, Vec3};
use litcube_common::{ClearColor, Lighting, SceneConfig};
use serde::Serialize;
use std::ops::Range;

/// Host-computed shader inputs for the single frame.
///
/// Field names follow the shader uniforms. `projection_y` and `projection_z`
/// hold rotations and are multiplied in after the model-view matrix:
/// `perspective * model_view * projection_y * projection_z * position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameUniforms {
    pub projection_y: Mat4,
    pub projection_z: Mat4,
    pub perspective: Mat4,
    pub model_view: Mat4,
    pub ambient_color: Vec3,
    pub light_color: Vec3,
    pub light_direction: Vec3,
}

impl FrameUniforms {
    pub fn compute(config: &SceneConfig, aspect: f32) -> Self {
        let view = &config.view;
        let radians = view.angle_radians();
        let Lighting {
            ambient_color,
            light_color,
            light_direction,
        } = config.lighting;

        Self {
            projection_y: transform::rotation_y(radians),
            projection_z: transform::rotation_z(radians),
            perspective: transform::perspective(view.fov_y, aspect, view.near, view.far),
            model_view: transform::translate(Mat4::IDENTITY, view.translation),
            ambient_color,
            light_color,
            light_direction,
        }
    }

    /// The full vertex transform as the shader applies it.
    pub fn clip_from_object(&self) -> Mat4 {
        self.perspective * self.model_view * self.projection_y * self.projection_z
    }

    /// Brightness the vertex stage computes for an object-space normal.
    pub fn brightness(&self, normal: Vec3) -> f32 {
        let n = self.model_view.transform_vector3(normal);
        self.light_direction.normalize().dot(n).max(0.0)
    }

    /// Color the fragment stage writes for a given brightness.
    pub fn shade(&self, brightness: f32) -> Vec3 {
        self.ambient_color + self.light_color * brightness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveMode {
    Triangles,
}

/// One non-indexed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawCall {
    pub mode: PrimitiveMode,
    pub first_vertex: u32,
    pub vertex_count: u32,
    pub indexed: bool,
}

impl DrawCall {
    /// The whole cube: 36 vertices, 12 triangles.
    pub fn cube() -> Self {
        Self {
            mode: PrimitiveMode::Triangles,
            first_vertex: 0,
            vertex_count: mesh::VERTEX_COUNT as u32,
            indexed: false,
        }
    }

    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }

    pub fn triangle_count(&self) -> u32 {
        match self.mode {
            PrimitiveMode::Triangles => self.vertex_count / 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Everything a backend needs to produce the frame, in submission order:
/// viewport, clear, uniforms, draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub viewport: Viewport,
    pub clear_color: ClearColor,
    pub uniforms: FrameUniforms,
    pub draw: DrawCall,
}

impl FramePlan {
    /// Builds the plan for a `width` x `height` surface. The aspect ratio is
    /// taken from the surface, as the viewport covers all of it.
    pub fn new(config: &SceneConfig, width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptySurface { width, height });
        }

        let viewport = Viewport {
            x: 0,
            y: 0,
            width,
            height,
        };
        let uniforms = FrameUniforms::compute(config, viewport.aspect());
        tracing::debug!(width, height, aspect = viewport.aspect(), "frame plan built");

        Ok(Self {
            viewport,
            clear_color: config.clear_color,
            uniforms,
            draw: DrawCall::cube(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_call_is_36_triangle_vertices_without_indices() {
        let draw = DrawCall::cube();
        assert_eq!(draw.mode, PrimitiveMode::Triangles);
        assert_eq!(draw.vertex_count, 36);
        assert_eq!(draw.vertices(), 0..36);
        assert_eq!(draw.triangle_count(), 12);
        assert!(!draw.indexed);
    }

    #[test]
    fn plan_uses_surface_aspect() {
        let config = SceneConfig::default();
        let plan = FramePlan::new(&config, 800, 400).unwrap();
        let expected = transform::perspective(config.view.fov_y, 2.0, 0.1, 10.0);
        assert_eq!(plan.uniforms.perspective, expected);
        assert_eq!(plan.viewport.aspect(), 2.0);
        assert_eq!(plan.clear_color, ClearColor::OPAQUE_BLACK);
    }

    #[test]
    fn plan_rejects_empty_surface() {
        let err = FramePlan::new(&SceneConfig::default(), 640, 0).unwrap_err();
        assert!(matches!(err, RenderError::EmptySurface { width: 640, height: 0 }));
    }

    #[test]
    fn uniforms_carry_default_scene() {
        let u = FrameUniforms::compute(&SceneConfig::default(), 1.0);
        assert_eq!(u.model_view.w_axis.truncate(), Vec3::new(0.0, -0.3, -3.5));
        assert_eq!(u.light_direction, Vec3::new(1.0, 1.0, -1.0));
        assert!((u.projection_y.x_axis.x - 0.939_692_6).abs() < 1e-6);
        assert!((u.projection_z.y_axis.z - -0.342_020_1).abs() < 1e-6);
    }

    #[test]
    fn lighting_ignores_rotations() {
        let u = FrameUniforms::compute(&SceneConfig::default(), 1.0);
        // model_view is a pure translation, so normals reach the light as-is.
        let up = u.brightness(Vec3::Y);
        assert!((up - 1.0 / 3.0_f32.sqrt()).abs() < 1e-6);
        assert_eq!(u.brightness(Vec3::NEG_X), 0.0);
        assert_eq!(u.shade(0.0), u.ambient_color);
    }

    #[test]
    fn cube_center_lands_inside_clip_volume() {
        let u = FrameUniforms::compute(&SceneConfig::default(), 4.0 / 3.0);
        let clip = u.clip_from_object() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.abs().max_element() < 1.0);
        assert!((clip.w - 3.5).abs() < 1e-5);
    }
}
