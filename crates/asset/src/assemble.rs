//! Flattens a parsed mesh into an interleaved vertex buffer and a
//! position-index buffer, ready for upload.
//!
//! Emission order is strict: faces in source order, fan triangles in order,
//! the three corners of each triangle in order. Record `k` of the vertex
//! buffer always pairs with entry `k` of the index buffer.

use meshcore::{LoadError, LoadResult};

use crate::{
    mesh::{FLOATS_PER_VERTEX, MeshBuffers, ObjMesh},
    resolve::{ColorSource, resolve_vertex},
    triangulate::{triangle_count, triangles},
};

/// Build both buffers, or fail without producing either.
pub fn assemble(mesh: &ObjMesh, source: ColorSource<'_>) -> LoadResult<MeshBuffers> {
    let tri_count = triangle_count(mesh);
    let mut vertices: Vec<f32> = Vec::with_capacity(tri_count * 3 * FLOATS_PER_VERTEX);
    let mut indices: Vec<u32> = Vec::with_capacity(tri_count * 3);

    for triangle in triangles(mesh) {
        for vref in &triangle.0 {
            let vertex = resolve_vertex(mesh, vref, source)?;
            vertices.extend_from_slice(&vertex.position);
            vertices.extend_from_slice(&vertex.color);
            vertices.extend_from_slice(&vertex.normal);
            indices.push(buffer_index(vref.position)?);
        }
    }

    log::info!(
        "Assembled {} triangles ({} vertex floats, {} indices, color source {:?})",
        tri_count,
        vertices.len(),
        indices.len(),
        source
    );

    Ok(MeshBuffers::new(vertices, indices))
}

/// Zero-based position index as stored in the index buffer.
fn buffer_index(position: i64) -> LoadResult<u32> {
    u32::try_from(position - 1).map_err(|_| LoadError::IndexOverflow { index: position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{obj::load_obj_from_str, texture::SolidColor};
    use meshcore::AttributeKind;

    const CUBE_SIDE: &str = r#"
# two faces of a cube plus a pentagon
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0.5 1.5 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
vn 0 0 -1
f 1/1/1 2/2/1 3/3/1 4/4/1
f 4/4/2 3/3/2 2/2/2 1/1/2
f 1/1/1 2/2/1 3/3/1 5/4/1 4/4/1
f 1 2 3
"#;

    fn mesh() -> ObjMesh {
        load_obj_from_str(CUBE_SIDE).expect("parse")
    }

    #[test]
    fn buffer_lengths_follow_triangle_count() {
        let mesh = mesh();
        let buffers = assemble(&mesh, ColorSource::TexCoords).expect("assemble");
        // 2 + 2 + 3 + 0
        assert_eq!(buffers.triangle_count(), 7);
        assert_eq!(buffers.vertices.len(), 9 * 3 * 7);
        assert_eq!(buffers.indices.len(), 3 * 7);
        assert!(buffers.is_valid());
        assert!(buffers.indices.iter().all(|&i| (i as usize) < mesh.positions().len()));
    }

    #[test]
    fn records_are_interleaved_in_emission_order() {
        let buffers = assemble(&mesh(), ColorSource::TexCoords).expect("assemble");
        assert_eq!(&buffers.indices[..6], &[0, 1, 2, 0, 2, 3]);
        // pentagon fan: (1,2,3) (1,3,5) (1,5,4)
        assert_eq!(&buffers.indices[12..], &[0, 1, 2, 0, 2, 4, 0, 4, 3]);

        let records = buffers.records();
        assert_eq!(records[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(records[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(records[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(records[6].normal, [0.0, 0.0, -1.0]);
        assert_eq!(&buffers.vertices[9..18], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn sampler_color_fills_second_slot() {
        let red = SolidColor([1.0, 0.0, 0.0]);
        let buffers = assemble(&mesh(), ColorSource::Baked(&red)).expect("assemble");
        for record in buffers.vertices.chunks_exact(FLOATS_PER_VERTEX) {
            assert_eq!(&record[3..6], &[1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let mesh = mesh();
        let a = assemble(&mesh, ColorSource::TexCoords).expect("first");
        let b = assemble(&mesh, ColorSource::TexCoords).expect("second");
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());

        let again = assemble(&load_obj_from_str(CUBE_SIDE).expect("reparse"), ColorSource::TexCoords)
            .expect("third");
        assert_eq!(a, again);
    }

    #[test]
    fn out_of_range_position_fails_whole_assembly() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\nf 1/1/1 2/1/1 99/1/1\n";
        let mesh = load_obj_from_str(src).expect("parse");
        let err = assemble(&mesh, ColorSource::TexCoords).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexResolution { kind: AttributeKind::Position, index: 99, len: 4 }
        ));
    }

    #[test]
    fn index_beyond_u32_is_rejected() {
        assert_eq!(buffer_index(1).ok(), Some(0));
        assert_eq!(buffer_index(u32::MAX as i64 + 1).ok(), Some(u32::MAX));
        let too_big = u32::MAX as i64 + 2;
        assert!(matches!(
            buffer_index(too_big),
            Err(LoadError::IndexOverflow { index }) if index == too_big
        ));
    }

    #[test]
    fn empty_mesh_gives_empty_buffers() {
        let mesh = load_obj_from_str("v 0 0 0\n").expect("parse");
        let buffers = assemble(&mesh, ColorSource::TexCoords).expect("assemble");
        assert!(buffers.vertices.is_empty());
        assert!(buffers.indices.is_empty());
        assert!(!buffers.is_valid());
    }
}
