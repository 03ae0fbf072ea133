//! Texture loading and the sampler capability used to bake per-vertex color.
//! Textures are decoded to RGBA8 from PNG or BMP files.

use std::path::Path;

use anyhow::Context;

/// Maps a texture coordinate to an RGB color in `0.0..=1.0`.
pub trait TextureSampler {
    fn sample(&self, u: f32, v: f32) -> [f32; 3];
}

/// Sampler returning the same color everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor(pub [f32; 3]);

impl TextureSampler for SolidColor {
    fn sample(&self, _u: f32, _v: f32) -> [f32; 3] {
        self.0
    }
}

/// Bytes per RGBA8 texel.
const BYTES_PER_PIXEL: usize = 4;

/// RGBA8 texture data, rows stored top to bottom.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        anyhow::ensure!(
            data.len() == expected,
            "RGBA8 data for {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load a texture from an image file (PNG or BMP).
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::new_rgba8(width, height, data)
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = self.width as usize * self.height as usize * BYTES_PER_PIXEL;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }

    /// Texel at `(x, y)`, or `None` outside the image.
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.data.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl TextureSampler for TextureData {
    /// Nearest texel, coordinates clamped to the image.
    fn sample(&self, u: f32, v: f32) -> [f32; 3] {
        if !self.is_valid() {
            return [0.0; 3];
        }
        let x = texel_coord(u, self.width);
        let y = texel_coord(v, self.height);
        match self.texel(x, y) {
            Some([r, g, b, _]) => [r, g, b].map(|c| c as f32 / 255.0),
            None => [0.0; 3],
        }
    }
}

fn texel_coord(t: f32, extent: u32) -> u32 {
    let scaled = (t * extent as f32).floor();
    // NaN falls through to 0
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as u32).min(extent - 1)
    }
}
