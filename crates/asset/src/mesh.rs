//! CPU-side mesh representation produced by the OBJ parser and consumed by
//! the buffer assembler.

use bytemuck::{Pod, Zeroable};

/// Floats per interleaved vertex record (position + color/uv + normal).
pub const FLOATS_PER_VERTEX: usize = 9;

/// Byte stride of one interleaved vertex record.
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Vertex position. `w` is kept when the source supplies it but never
/// written to the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub xyz: [f32; 3],
    pub w: f32,
}

impl Position {
    pub fn new(xyz: [f32; 3]) -> Self {
        Self { xyz, w: 1.0 }
    }
}

/// Texture coordinate, always 3 components (`w` padded with `0.0`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexCoord(pub [f32; 3]);

impl TexCoord {
    pub fn u(&self) -> f32 {
        self.0[0]
    }

    pub fn v(&self) -> f32 {
        self.0[1]
    }
}

/// Vertex normal as written in the file; not normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Normal(pub [f32; 3]);

/// Raw 1-based face indices, exactly as they appear in the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VertexRef {
    pub position: i64,
    pub texcoord: Option<i64>,
    pub normal: Option<i64>,
}

impl VertexRef {
    pub fn new(position: i64, texcoord: Option<i64>, normal: Option<i64>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// Polygon in source order. May hold fewer than 3 refs when tokens were
/// discarded; such a face yields no triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    pub refs: Vec<VertexRef>,
}

/// One triangle of a fan-triangulated face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle(pub [VertexRef; 3]);

/// Parsed OBJ contents. Built once by the parser, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    positions: Vec<Position>,
    texcoords: Vec<TexCoord>,
    normals: Vec<Normal>,
    faces: Vec<Face>,
}

impl ObjMesh {
    pub(crate) fn from_parts(
        positions: Vec<Position>,
        texcoords: Vec<TexCoord>,
        normals: Vec<Normal>,
        faces: Vec<Face>,
    ) -> Self {
        Self {
            positions,
            texcoords,
            normals,
            faces,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

/// One interleaved record of the vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Byte offsets of position, color/uv and normal inside a record.
    pub const ATTRIBUTE_OFFSETS: [usize; 3] = [0, 12, 24];
}

/// Interleaved vertex buffer (stride 9 floats) plus per-vertex position indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both buffers are non-empty and agree on vertex count.
    pub fn is_valid(&self) -> bool {
        !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self.vertices.len() == self.indices.len() * FLOATS_PER_VERTEX
    }

    /// View the vertex buffer as typed records.
    ///
    /// Panics if `vertices` is not a whole number of records.
    pub fn records(&self) -> &[Vertex] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
