//! Asset loading: OBJ meshes to interleaved GPU-ready buffers.
//! Parser -> fan triangulator -> attribute resolver -> buffer assembler,
//! with optional per-vertex color baked from a texture.

pub mod assemble;
pub mod mesh;
pub mod model;
pub mod obj;
pub mod resolve;
pub mod texture;
pub mod triangulate;

pub use assemble::assemble;
pub use mesh::{MeshBuffers, ObjMesh, Vertex};
pub use meshcore::{AttributeKind, LoadError, LoadResult};
pub use model::Model;
pub use resolve::ColorSource;
pub use texture::{SolidColor, TextureData, TextureSampler};
