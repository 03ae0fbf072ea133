//! Fan triangulation of convex polygonal faces.

use crate::mesh::{Face, ObjMesh, Triangle};

/// Split a face into `N - 2` triangles sharing its first vertex.
///
/// Non-convex faces are triangulated the same way and may overlap
/// themselves. Faces with fewer than 3 refs yield nothing.
pub fn triangulate(face: &Face) -> impl Iterator<Item = Triangle> + '_ {
    let refs = &face.refs;
    (1..refs.len().saturating_sub(1)).map(move |i| Triangle([refs[0], refs[i], refs[i + 1]]))
}

/// Triangles produced by the whole mesh.
pub fn triangle_count(mesh: &ObjMesh) -> usize {
    mesh.faces()
        .iter()
        .map(|face| face.refs.len().saturating_sub(2))
        .sum()
}

/// All triangles of the mesh, faces in source order.
pub fn triangles(mesh: &ObjMesh) -> impl Iterator<Item = Triangle> + '_ {
    mesh.faces().iter().flat_map(triangulate)
}
