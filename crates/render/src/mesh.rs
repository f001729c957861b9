//! The fixed cube mesh: 6 faces, two triangles each, no index buffer.

use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// Interleaved vertex: position then normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub const VERTEX_STRIDE: u64 = size_of::<Vertex>() as u64;
pub const POSITION_OFFSET: u64 = offset_of!(Vertex, position) as u64;
pub const NORMAL_OFFSET: u64 = offset_of!(Vertex, normal) as u64;

pub const FACE_COUNT: usize = 6;
pub const VERTICES_PER_FACE: usize = 6;
pub const VERTEX_COUNT: usize = FACE_COUNT * VERTICES_PER_FACE;
pub const FLOATS_PER_VERTEX: usize = 6;

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

const NX: [f32; 3] = [-1.0, 0.0, 0.0];
const PX: [f32; 3] = [1.0, 0.0, 0.0];
const NY: [f32; 3] = [0.0, -1.0, 0.0];
const PY: [f32; 3] = [0.0, 1.0, 0.0];
const NZ: [f32; 3] = [0.0, 0.0, -1.0];
const PZ: [f32; 3] = [0.0, 0.0, 1.0];

const H: f32 = 0.5;

/// Unit cube centred on the origin, faces ordered -X, +X, -Y, +Y, -Z, +Z.
#[rustfmt::skip]
pub static CUBE_VERTICES: [Vertex; VERTEX_COUNT] = [
    // -X
    v([-H, -H, -H], NX), v([-H,  H,  H], NX), v([-H,  H, -H], NX),
    v([-H, -H,  H], NX), v([-H,  H,  H], NX), v([-H, -H, -H], NX),
    // +X
    v([ H, -H, -H], PX), v([ H,  H, -H], PX), v([ H,  H,  H], PX),
    v([ H,  H,  H], PX), v([ H, -H,  H], PX), v([ H, -H, -H], PX),
    // -Y
    v([-H, -H, -H], NY), v([ H, -H, -H], NY), v([ H, -H,  H], NY),
    v([ H, -H,  H], NY), v([-H, -H,  H], NY), v([-H, -H, -H], NY),
    // +Y
    v([-H,  H, -H], PY), v([ H,  H,  H], PY), v([ H,  H, -H], PY),
    v([-H,  H,  H], PY), v([ H,  H,  H], PY), v([-H,  H, -H], PY),
    // -Z
    v([ H, -H, -H], NZ), v([-H, -H, -H], NZ), v([ H,  H, -H], NZ),
    v([-H,  H, -H], NZ), v([ H,  H, -H], NZ), v([-H, -H, -H], NZ),
    // +Z
    v([-H, -H,  H], PZ), v([ H, -H,  H], PZ), v([ H,  H,  H], PZ),
    v([ H,  H,  H], PZ), v([-H,  H,  H], PZ), v([-H, -H,  H], PZ),
];

/// Flat float view of the mesh, as it is uploaded.
pub fn cube_floats() -> &'static [f32] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

/// Raw bytes for the vertex buffer.
pub fn cube_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

/// The six vertices of face `index`, or `None` past the last face.
pub fn face(index: usize) -> Option<&'static [Vertex]> {
    CUBE_VERTICES.chunks_exact(VERTICES_PER_FACE).nth(index)
}

pub fn faces() -> impl Iterator<Item = &'static [Vertex]> {
    CUBE_VERTICES.chunks_exact(VERTICES_PER_FACE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_holds_216_floats() {
        assert_eq!(cube_floats().len(), 216);
        assert_eq!(cube_floats().len(), VERTEX_COUNT * FLOATS_PER_VERTEX);
        assert_eq!(cube_bytes().len(), 216 * 4);
    }

    #[test]
    fn layout_is_24_byte_stride() {
        assert_eq!(VERTEX_STRIDE, 24);
        assert_eq!(POSITION_OFFSET, 0);
        assert_eq!(NORMAL_OFFSET, 12);
    }

    #[test]
    fn normals_are_uniform_within_each_face() {
        assert_eq!(faces().count(), FACE_COUNT);
        for (i, verts) in faces().enumerate() {
            let n = verts[0].normal;
            assert!(verts.iter().all(|v| v.normal == n), "face {i} has mixed normals");
        }
    }

    #[test]
    fn normals_point_out_of_their_face() {
        for verts in faces() {
            let n = verts[0].normal;
            for v in verts {
                let d: f32 = v.position.iter().zip(n).map(|(p, n)| p * n).sum();
                assert_eq!(d, 0.5);
            }
        }
    }

    #[test]
    fn flat_view_interleaves_position_and_normal() {
        let floats = cube_floats();
        assert_eq!(&floats[0..6], &[-0.5, -0.5, -0.5, -1.0, 0.0, 0.0]);
        assert_eq!(&floats[210..216], &[-0.5, -0.5, 0.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn face_out_of_range() {
        assert!(face(5).is_some());
        assert!(face(6).is_none());
    }
}
