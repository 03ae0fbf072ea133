//! One-call loading: OBJ file (plus optional texture) to upload-ready buffers.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    assemble::assemble,
    mesh::{MeshBuffers, ObjMesh},
    obj::{load_obj_from_path, load_obj_from_str},
    resolve::ColorSource,
    texture::{TextureData, TextureSampler},
};

/// Parsed mesh together with the buffers assembled from it.
#[derive(Clone, Debug)]
pub struct Model {
    pub mesh: ObjMesh,
    pub buffers: MeshBuffers,
}

impl Model {
    /// Load `obj_path`; when `texture_path` is given, vertex colors are
    /// baked from that texture instead of passing texture coordinates.
    pub fn load(obj_path: impl AsRef<Path>, texture_path: Option<&Path>) -> Result<Self> {
        let obj_path = obj_path.as_ref();
        let mesh = load_obj_from_path(obj_path)?;

        let texture = texture_path.map(TextureData::load).transpose()?;
        let source = match &texture {
            Some(tex) => ColorSource::Baked(tex),
            None => ColorSource::TexCoords,
        };

        let buffers = assemble(&mesh, source)
            .with_context(|| format!("Failed to build buffers for {}", obj_path.display()))?;
        Ok(Self { mesh, buffers })
    }

    /// Parse in-memory OBJ text, optionally baking colors from `sampler`.
    pub fn from_source(contents: &str, sampler: Option<&dyn TextureSampler>) -> Result<Self> {
        let mesh = load_obj_from_str(contents)?;
        let source = sampler.map_or(ColorSource::TexCoords, ColorSource::Baked);
        let buffers = assemble(&mesh, source)?;
        Ok(Self { mesh, buffers })
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::SolidColor;
    use meshcore::LoadError;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.3 0.6\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";

    #[test]
    fn from_source_without_sampler_keeps_uv() {
        let model = Model::from_source(TRIANGLE, None).expect("model");
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(model.buffers.records()[0].color, [0.3, 0.6, 0.0]);
    }

    #[test]
    fn from_source_with_sampler_bakes_color() {
        let green = SolidColor([0.0, 1.0, 0.0]);
        let model = Model::from_source(TRIANGLE, Some(&green)).expect("model");
        assert!(model.buffers.records().iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn errors_keep_their_type() {
        let err = Model::from_source("f 1/1/1 2/1/1 7/1/1\n", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::IndexResolution { .. })
        ));
    }

    #[test]
    fn load_reads_obj_from_disk() {
        let dir = std::env::temp_dir().join(format!("asset-model-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("tri.obj");
        std::fs::write(&path, TRIANGLE).expect("write obj");

        let model = Model::load(&path, None).expect("load");
        assert_eq!(model.buffers.indices, vec![0, 1, 2]);

        let missing_texture = Model::load(&path, Some(dir.join("missing.png").as_path()));
        assert!(missing_texture.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
