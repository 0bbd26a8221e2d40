pub use glam::{EulerRot, Quat, Vec2, Vec3};

/// Straight (non-premultiplied) RGBA8 vertex color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Floating point RGBA color, nominally in `[0, 1]` per component.
///
/// Gradients and color noise operate in this space; conversion back to [`Rgba8`] clamps and
/// rounds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "one")]
    pub a: f32,
}

fn one() -> f32 {
    1.0
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        fn to_u8(c: f32) -> u8 {
            if c.is_nan() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
            a: to_u8(self.a),
        }
    }
}

impl From<Rgba8> for Rgba {
    fn from(c: Rgba8) -> Self {
        Self {
            r: f32::from(c.r) / 255.0,
            g: f32::from(c.g) / 255.0,
            b: f32::from(c.b) / 255.0,
            a: f32::from(c.a) / 255.0,
        }
    }
}

/// The four corners of one glyph quad, in the order the layout emits them.
///
/// Corner 0 and corner 2 are diagonally opposite; the pivot of rotate/scale channels is
/// measured along that diagonal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad(pub [Vec3; 4]);

impl Quad {
    /// Read the quad starting at `offset`. Returns `None` if fewer than four vertices remain.
    pub fn read(vertices: &[Vec3], offset: usize) -> Option<Self> {
        let s = vertices.get(offset..offset.checked_add(4)?)?;
        Some(Self([s[0], s[1], s[2], s[3]]))
    }

    /// Write the quad starting at `offset`. Returns `false` if it does not fit.
    pub fn write(self, vertices: &mut [Vec3], offset: usize) -> bool {
        let Some(end) = offset.checked_add(4) else {
            return false;
        };
        match vertices.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(&self.0);
                true
            }
            None => false,
        }
    }

    pub fn centroid(&self) -> Vec3 {
        (self.0[0] + self.0[1] + self.0[2] + self.0[3]) * 0.25
    }

    /// Axis-aligned `(min, max)` extents of the corners.
    pub fn extents(&self) -> (Vec3, Vec3) {
        let mut min = self.0[0];
        let mut max = self.0[0];
        for v in &self.0[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }
}

/// Per-corner vertex colors of one glyph quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuadColors(pub [Rgba8; 4]);

impl QuadColors {
    pub fn read(colors: &[Rgba8], offset: usize) -> Option<Self> {
        let s = colors.get(offset..offset.checked_add(4)?)?;
        Some(Self([s[0], s[1], s[2], s[3]]))
    }

    pub fn write(self, colors: &mut [Rgba8], offset: usize) -> bool {
        let Some(end) = offset.checked_add(4) else {
            return false;
        };
        match colors.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(&self.0);
                true
            }
            None => false,
        }
    }

    pub fn uniform(c: Rgba8) -> Self {
        Self([c; 4])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
