//! Noise sources for the noise channels.
//!
//! A sampler maps a wrapped `(u, v)` coordinate to an RGB triple in `[0, 1]^3`. The channel
//! evaluators recentre that triple to `[-1, 1]^3` themselves.

use std::{fmt, sync::Arc};

use crate::foundation::{
    core::Vec3,
    error::{GlyphwaveError, GlyphwaveResult},
    math::{mix64, unit_f32},
};

/// 2D noise lookup. `u` and `v` are already wrapped into `[0, 1)`.
pub trait NoiseSampler: Send + Sync + fmt::Debug {
    fn sample(&self, u: f32, v: f32) -> Vec3;
}

/// Serializable description of where a noise channel gets its sampler from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseSource {
    /// Procedural lattice noise, see [`ValueNoise`].
    Value {
        seed: u64,
        #[serde(default = "default_cells")]
        cells: u32,
    },
    /// The host attaches a sampler at runtime (for example an [`ImageNoise`]).
    External,
}

fn default_cells() -> u32 {
    8
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::External
    }
}

impl NoiseSource {
    /// Build the sampler this source describes. `External` has none of its own.
    pub fn build(&self) -> Option<Arc<dyn NoiseSampler>> {
        match *self {
            Self::Value { seed, cells } => Some(Arc::new(ValueNoise::new(seed, cells))),
            Self::External => None,
        }
    }
}

/// Nearest-pixel lookup into an RGBA image, ignoring the alpha channel.
#[derive(Clone)]
pub struct ImageNoise {
    image: image::RgbaImage,
}

impl fmt::Debug for ImageNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageNoise")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

impl ImageNoise {
    pub fn new(image: image::RgbaImage) -> GlyphwaveResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(GlyphwaveError::animation("noise image must not be empty"));
        }
        Ok(Self { image })
    }

    pub fn from_png_bytes(bytes: &[u8]) -> GlyphwaveResult<Self> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|e| GlyphwaveError::Other(anyhow::Error::new(e)))?;
        Self::new(img.to_rgba8())
    }
}

impl NoiseSampler for ImageNoise {
    fn sample(&self, u: f32, v: f32) -> Vec3 {
        let (w, h) = self.image.dimensions();
        let x = ((u * w as f32).floor() as u32).min(w - 1);
        let y = ((v * h as f32).floor() as u32).min(h - 1);
        let p = self.image.get_pixel(x, y).0;
        Vec3::new(
            f32::from(p[0]) / 255.0,
            f32::from(p[1]) / 255.0,
            f32::from(p[2]) / 255.0,
        )
    }
}

/// Deterministic lattice value noise that tiles on the unit square.
///
/// Each RGB component is an independent field: `cells x cells` hashed lattice values,
/// bilinearly blended with a smoothstep weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u64,
    cells: u32,
}

impl ValueNoise {
    pub fn new(seed: u64, cells: u32) -> Self {
        Self {
            seed,
            cells: cells.max(1),
        }
    }

    fn lattice(&self, channel: u64, x: u32, y: u32) -> f32 {
        let h = mix64(
            self.seed
                ^ channel.wrapping_mul(0xD6E8_FEB8_6659_FD93)
                ^ (u64::from(x) << 32)
                ^ u64::from(y),
        );
        unit_f32(h)
    }

    fn channel(&self, channel: u64, u: f32, v: f32) -> f32 {
        let n = self.cells;
        let fx = u * n as f32;
        let fy = v * n as f32;
        let x0 = (fx.floor() as u32).min(n - 1);
        let y0 = (fy.floor() as u32).min(n - 1);
        let x1 = (x0 + 1) % n;
        let y1 = (y0 + 1) % n;
        let tx = smooth(fx - x0 as f32);
        let ty = smooth(fy - y0 as f32);

        let a = self.lattice(channel, x0, y0);
        let b = self.lattice(channel, x1, y0);
        let c = self.lattice(channel, x0, y1);
        let d = self.lattice(channel, x1, y1);
        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        top + (bottom - top) * ty
    }
}

fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl NoiseSampler for ValueNoise {
    fn sample(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(
            self.channel(0, u, v),
            self.channel(1, u, v),
            self.channel(2, u, v),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/noise.rs"]
mod tests;
