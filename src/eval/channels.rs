//! Channel evaluators: (channel, clock, character) -> delta.
//!
//! Evaluators are pure. Anything that cannot produce a usable delta (missing sampler,
//! non-finite curve output or uv) yields `None`, which callers treat as the identity.

use crate::{
    animation::{
        channel::{Channel, NoiseChannel, Timing},
        noise::NoiseSampler,
    },
    eval::timing::local_progress,
    foundation::{
        core::{EulerRot, Quat, Rgba, Vec3},
        math::{clamp01, lerp, wrap01},
    },
};

/// Per-character inputs shared by all channels in one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterCtx {
    pub index: usize,
    /// Number of characters iterated this pass; normalizes the noise `u` coordinate.
    pub count: usize,
    /// Seconds of noise clock, drives uv scrolling.
    pub noise_time: f32,
}

/// A geometric delta for one glyph quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryOp {
    Translate(Vec3),
    /// Rotation about the pivot.
    Rotate(Quat),
    /// Component-wise scale about the pivot.
    Scale(Vec3),
}

/// A vertex-color delta for one glyph quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorOp {
    /// Replace all four colors.
    Replace(Rgba),
    /// Add a signed rgb offset to corner 0's color and broadcast it.
    Perturb(Vec3),
    /// Multiply corner 0's alpha by a factor in `[0, 1]` and broadcast the alpha.
    MultiplyAlpha(f32),
    /// Subtract from corner 0's alpha (in 0..255 units) and broadcast the alpha.
    SubtractAlpha(f32),
}

/// Curve output for `character` at `clock`, or `None` if it is not finite.
pub fn ratio(clock: f32, character: usize, timing: &Timing) -> Option<f32> {
    let r = timing
        .curve
        .evaluate(local_progress(clock, character, timing));
    r.is_finite().then_some(r)
}

/// Euler angles in degrees, applied z then x then y.
pub fn euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Sample `sampler` for this character and recentre to `[-1, 1]^3`.
pub fn signed_noise(
    noise: &NoiseChannel,
    sampler: &dyn NoiseSampler,
    ctx: CharacterCtx,
) -> Option<Vec3> {
    raw_noise(noise, sampler, ctx).map(|s| s * 2.0 - Vec3::ONE)
}

/// Sample `sampler` for this character, `[0, 1]^3`.
pub fn raw_noise(
    noise: &NoiseChannel,
    sampler: &dyn NoiseSampler,
    ctx: CharacterCtx,
) -> Option<Vec3> {
    let along = if ctx.count == 0 {
        0.0
    } else {
        ctx.index as f32 / ctx.count as f32
    };
    let u = along * noise.tiling.x + noise.offset.x + noise.scroll_speed.x * ctx.noise_time;
    let v = noise.offset.y + noise.scroll_speed.y * ctx.noise_time;
    let s = sampler.sample(wrap01(u)?, wrap01(v)?);
    s.is_finite().then_some(s)
}

/// Evaluate a geometry channel. Returns `None` for color channels.
pub fn geometry_op(
    channel: &Channel,
    sampler: Option<&dyn NoiseSampler>,
    clock: f32,
    ctx: CharacterCtx,
) -> Option<GeometryOp> {
    let r = ratio(clock, ctx.index, channel.timing())?;
    let op = match channel {
        Channel::Position(c) => GeometryOp::Translate(c.from.lerp(c.to, r)),
        Channel::Rotation(c) => GeometryOp::Rotate(euler_degrees(c.from.lerp(c.to, r))),
        Channel::Scale(c) => {
            let s = c.from.lerp(c.to, r);
            GeometryOp::Scale(Vec3::new(s.x, s.y, 1.0))
        }
        Channel::PositionNoise(n) => {
            GeometryOp::Translate(signed_noise(n, sampler?, ctx)? * r)
        }
        Channel::RotationNoise(n) => {
            GeometryOp::Rotate(euler_degrees(signed_noise(n, sampler?, ctx)? * r))
        }
        Channel::ScaleNoise(n) => {
            GeometryOp::Scale(Vec3::ONE + signed_noise(n, sampler?, ctx)? * r)
        }
        Channel::Alpha(_)
        | Channel::Color(_)
        | Channel::ColorNoise(_)
        | Channel::AlphaNoise(_) => return None,
    };
    Some(op)
}

/// Evaluate a color channel. Returns `None` for geometry channels.
pub fn color_op(
    channel: &Channel,
    sampler: Option<&dyn NoiseSampler>,
    clock: f32,
    ctx: CharacterCtx,
) -> Option<ColorOp> {
    let r = ratio(clock, ctx.index, channel.timing())?;
    let op = match channel {
        Channel::Color(c) => ColorOp::Replace(c.gradient.evaluate(r)),
        Channel::ColorNoise(n) => ColorOp::Perturb(signed_noise(n, sampler?, ctx)? * r),
        Channel::Alpha(c) => ColorOp::MultiplyAlpha(clamp01(lerp(c.from, c.to, clamp01(r)))),
        Channel::AlphaNoise(n) => {
            ColorOp::SubtractAlpha(255.0 * raw_noise(n, sampler?, ctx)?.x * r)
        }
        Channel::Position(_)
        | Channel::Rotation(_)
        | Channel::Scale(_)
        | Channel::PositionNoise(_)
        | Channel::RotationNoise(_)
        | Channel::ScaleNoise(_) => return None,
    };
    Some(op)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/channels.rs"]
mod tests;
