//! Host-side matrix construction.
//!
//! All matrices are column-major, laid out the way `uniformMatrix4fv` and
//! `glam::Mat4::to_cols_array` expect: entry `[12..15]` is the last column.

use glam::{Mat4, Vec3};

/// Symmetric-frustum projection into OpenGL clip space.
///
/// `f = cot(fov_y / 2)`, computed as `tan(pi/2 - fov_y/2)`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = (std::f32::consts::FRAC_PI_2 - 0.5 * fov_y).tan();
    let range_inv = 1.0 / (near - far);

    #[rustfmt::skip]
    let m = Mat4::from_cols_array(&[
        f / aspect, 0.0, 0.0,                        0.0,
        0.0,        f,   0.0,                        0.0,
        0.0,        0.0, (near + far) * range_inv,   -1.0,
        0.0,        0.0, near * far * range_inv * 2.0, 0.0,
    ]);
    m
}

/// Post-multiplies `m` by a translation: the last column becomes
/// `m * (x, y, z, 1)` and the rest of `m` is untouched.
pub fn translate(m: Mat4, v: Vec3) -> Mat4 {
    let mut out = m;
    out.w_axis = m * v.extend(1.0);
    out
}

/// Rotation about the Y axis by `radians`.
pub fn rotation_y(radians: f32) -> Mat4 {
    let (sin, cos) = radians.sin_cos();

    #[rustfmt::skip]
    let m = Mat4::from_cols_array(&[
        cos, 0.0, -sin, 0.0,
        0.0, 1.0, 0.0,  0.0,
        sin, 0.0, cos,  0.0,
        0.0, 0.0, 0.0,  1.0,
    ]);
    m
}

/// The matrix bound as `projection_z`.
///
/// The values leave X fixed and mix Y with Z, so this is numerically a
/// rotation about the X axis. Name and values are kept paired as the shader
/// interface defines them.
pub fn rotation_z(radians: f32) -> Mat4 {
    let (sin, cos) = radians.sin_cos();

    #[rustfmt::skip]
    let m = Mat4::from_cols_array(&[
        1.0, 0.0,  0.0, 0.0,
        0.0, cos,  sin, 0.0,
        0.0, -sin, cos, 0.0,
        0.0, 0.0,  0.0, 1.0,
    ]);
    m
}
