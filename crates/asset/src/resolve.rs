//! Resolves raw face indices against the parsed attribute lists.

use meshcore::{AttributeKind, LoadError, LoadResult};

use crate::{
    mesh::{ObjMesh, Vertex, VertexRef},
    texture::TextureSampler,
};

/// What goes into the second attribute slot of each vertex record.
#[derive(Clone, Copy)]
pub enum ColorSource<'a> {
    /// The texture coordinate itself, padded to 3 components.
    TexCoords,
    /// Color baked from the sampler at the vertex's `(u, v)`.
    Baked(&'a dyn TextureSampler),
}

impl std::fmt::Debug for ColorSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSource::TexCoords => f.write_str("TexCoords"),
            ColorSource::Baked(_) => f.write_str("Baked(..)"),
        }
    }
}

/// Convert a 1-based OBJ index into a slice offset.
pub fn resolve_index(index: i64, len: usize, kind: AttributeKind) -> LoadResult<usize> {
    match usize::try_from(index) {
        Ok(i) if (1..=len).contains(&i) => Ok(i - 1),
        _ => Err(LoadError::IndexResolution { kind, index, len }),
    }
}

/// Build the interleaved record for one face vertex.
///
/// A missing texcoord leaves the color slot zeroed without consulting the
/// sampler; a missing normal is zeroed too.
pub fn resolve_vertex(mesh: &ObjMesh, vref: &VertexRef, source: ColorSource<'_>) -> LoadResult<Vertex> {
    let positions = mesh.positions();
    let position = positions[resolve_index(vref.position, positions.len(), AttributeKind::Position)?].xyz;

    let color = match vref.texcoord {
        Some(index) => {
            let texcoords = mesh.texcoords();
            let tc = texcoords[resolve_index(index, texcoords.len(), AttributeKind::TexCoord)?];
            match source {
                ColorSource::TexCoords => tc.0,
                ColorSource::Baked(sampler) => sampler.sample(tc.u(), tc.v()),
            }
        }
        None => [0.0; 3],
    };

    let normal = match vref.normal {
        Some(index) => {
            let normals = mesh.normals();
            normals[resolve_index(index, normals.len(), AttributeKind::Normal)?].0
        }
        None => [0.0; 3],
    };

    Ok(Vertex {
        position,
        color,
        normal,
    })
}
