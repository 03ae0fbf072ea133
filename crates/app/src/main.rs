//! Entry point: load an OBJ model into interleaved buffers and report what
//! a renderer would upload.

use std::path::PathBuf;

use anyhow::{Result, bail};
use asset::{
    Model, Vertex,
    mesh::{FLOATS_PER_VERTEX, VERTEX_STRIDE},
};

fn parse_model_arg() -> Option<PathBuf> {
    // --model=<path>
    std::env::args()
        .find_map(|arg| arg.strip_prefix("--model=").map(PathBuf::from))
}

fn parse_texture_arg() -> Option<PathBuf> {
    // --texture=<path>; --no-texture wins if both are given
    let mut texture = None;
    for arg in std::env::args() {
        if arg == "--no-texture" {
            return None;
        }
        if let Some(val) = arg.strip_prefix("--texture=") {
            texture = Some(PathBuf::from(val));
        }
    }
    texture
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(model_path) = parse_model_arg() else {
        bail!("usage: app --model=<file.obj> [--texture=<file.png|bmp>] [--no-texture]");
    };
    let texture_path = parse_texture_arg();
    log::info!(
        "Loading model {:?}, texture={:?}",
        model_path,
        texture_path
    );

    let model = Model::load(&model_path, texture_path.as_deref())?;
    let buffers = &model.buffers;

    log::info!(
        "Vertex buffer: {} records x {} floats ({} bytes, stride {}, attribute offsets {:?})",
        buffers.vertex_count(),
        FLOATS_PER_VERTEX,
        buffers.vertex_bytes().len(),
        VERTEX_STRIDE,
        Vertex::ATTRIBUTE_OFFSETS
    );
    log::info!(
        "Index buffer: {} indices ({} bytes), {} triangles to draw",
        buffers.indices.len(),
        buffers.index_bytes().len(),
        model.triangle_count()
    );

    if !buffers.is_valid() {
        log::warn!("Model produced no triangles; nothing to draw");
    }

    Ok(())
}
