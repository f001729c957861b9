use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Directional light and ambient term, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient_color: Vec3,
    pub light_color: Vec3,
    /// Direction towards the light. Normalized in the shader, not here.
    pub light_direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::new(0.0, 0.3, 0.0),
            light_color: Vec3::new(0.8, 0.8, 0.8),
            light_direction: Vec3::new(1.0, 1.0, -1.0),
        }
    }
}

/// Projection and placement of the cube in view space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Model-view translation.
    pub translation: Vec3,
    /// Angle fed to both rotation matrices, in degrees.
    pub angle_degrees: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 10.0,
            translation: Vec3::new(0.0, -0.3, -3.5),
            angle_degrees: -20.0,
        }
    }
}

impl ViewParams {
    pub fn angle_radians(&self) -> f32 {
        self.angle_degrees.to_radians()
    }
}

/// RGBA clear color. Stored as f64 to match what GPU APIs take for clears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    pub const OPAQUE_BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::OPAQUE_BLACK
    }
}

/// Everything needed to describe the single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub lighting: Lighting,
    pub view: ViewParams,
    pub clear_color: ClearColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lighting_matches_scene() {
        let l = Lighting::default();
        assert_eq!(l.ambient_color, Vec3::new(0.0, 0.3, 0.0));
        assert_eq!(l.light_color, Vec3::splat(0.8));
        assert_eq!(l.light_direction, Vec3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn default_view_params() {
        let v = ViewParams::default();
        assert_eq!(v.near, 0.1);
        assert_eq!(v.far, 10.0);
        assert_eq!(v.translation, Vec3::new(0.0, -0.3, -3.5));
        assert!((v.angle_radians() - (-20.0_f32).to_radians()).abs() < 1e-7);
    }

    #[test]
    fn clear_color_is_opaque_black() {
        let c = SceneConfig::default().clear_color;
        assert_eq!(c, ClearColor::OPAQUE_BLACK);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn scene_config_serializes_field_names() {
        let json = serde_json::to_value(SceneConfig::default()).unwrap();
        assert_eq!(json["lighting"]["light_direction"][2], -1.0);
        assert_eq!(json["view"]["angle_degrees"], -20.0);
    }
}
