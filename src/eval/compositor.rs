//! Apply channel deltas to one glyph quad.
//!
//! The pivot is re-measured from the quad's current corners before every rotate or scale, so
//! earlier stages shift where later ones pivot.

use crate::{
    eval::channels::{ColorOp, GeometryOp},
    foundation::core::{Quad, QuadColors, Rgba, Vec2, Vec3},
};

/// Point along the corner-0 to corner-2 diagonal at `pivot` (per axis, `z` stays at corner 0).
pub fn pivot_point(quad: &Quad, pivot: Vec2) -> Vec3 {
    let [v0, _, v2, _] = quad.0;
    v0 + (v2 - v0) * pivot.extend(0.0)
}

pub fn apply_geometry(quad: Quad, op: GeometryOp, pivot: Vec2) -> Quad {
    match op {
        GeometryOp::Translate(d) => Quad(quad.0.map(|v| v + d)),
        GeometryOp::Rotate(q) => {
            let c = pivot_point(&quad, pivot);
            Quad(quad.0.map(|v| q * (v - c) + c))
        }
        GeometryOp::Scale(s) => {
            let c = pivot_point(&quad, pivot);
            Quad(quad.0.map(|v| (v - c) * s + c))
        }
    }
}

/// Fold `ops` over `quad` in order.
pub fn animate_geometry(
    quad: Quad,
    ops: impl IntoIterator<Item = GeometryOp>,
    pivot: Vec2,
) -> Quad {
    ops.into_iter()
        .fold(quad, |q, op| apply_geometry(q, op, pivot))
}

pub fn apply_color(colors: QuadColors, op: ColorOp) -> QuadColors {
    let c0 = colors.0[0];
    match op {
        ColorOp::Replace(c) => QuadColors::uniform(c.to_rgba8()),
        ColorOp::Perturb(d) => {
            let base = Rgba::from(c0);
            let shifted = Rgba::new(base.r + d.x, base.g + d.y, base.b + d.z, base.a);
            QuadColors::uniform(shifted.to_rgba8())
        }
        ColorOp::MultiplyAlpha(f) => {
            let a = (f32::from(c0.a) * f) as u8;
            QuadColors(colors.0.map(|c| c.with_alpha(a)))
        }
        ColorOp::SubtractAlpha(x) => {
            let a = (f32::from(c0.a) - x).clamp(0.0, 255.0) as u8;
            QuadColors(colors.0.map(|c| c.with_alpha(a)))
        }
    }
}

pub fn animate_colors(colors: QuadColors, ops: impl IntoIterator<Item = ColorOp>) -> QuadColors {
    ops.into_iter().fold(colors, apply_color)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/compositor.rs"]
mod tests;
