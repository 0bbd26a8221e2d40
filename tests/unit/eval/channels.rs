use super::*;
use crate::{
    animation::{curve::Curve, gradient::Gradient, noise::NoiseSource},
    foundation::core::Vec2,
};

#[derive(Debug)]
struct Constant(Vec3);

impl NoiseSampler for Constant {
    fn sample(&self, _u: f32, _v: f32) -> Vec3 {
        self.0
    }
}

#[derive(Debug)]
struct EchoUv;

impl NoiseSampler for EchoUv {
    fn sample(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(u, v, 0.0)
    }
}

fn ctx(index: usize, count: usize) -> CharacterCtx {
    CharacterCtx {
        index,
        count,
        noise_time: 0.0,
    }
}

fn settled() -> Timing {
    Timing::new(0.0, 0.0, 1.0)
}

fn noise() -> NoiseChannel {
    NoiseChannel::new(settled(), NoiseSource::External)
}

#[test]
fn position_interpolates_from_to() {
    let ch = Channel::position(settled(), Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(
        geometry_op(&ch, None, 0.5, ctx(0, 1)),
        Some(GeometryOp::Translate(Vec3::new(5.0, 0.0, 0.0)))
    );
    assert_eq!(color_op(&ch, None, 0.5, ctx(0, 1)), None);
}

#[test]
fn scale_keeps_depth_at_one() {
    let ch = Channel::scale(settled(), Vec2::ONE, Vec2::new(3.0, 5.0));
    assert_eq!(
        geometry_op(&ch, None, 1.0, ctx(0, 1)),
        Some(GeometryOp::Scale(Vec3::new(3.0, 5.0, 1.0)))
    );
}

#[test]
fn euler_z_rotation_turns_x_into_y() {
    let q = euler_degrees(Vec3::new(0.0, 0.0, 90.0));
    let v = q * Vec3::X;
    assert!((v - Vec3::Y).length() < 1e-5);
}

#[test]
fn non_finite_curve_output_is_identity() {
    let ch = Channel::position(
        settled().with_curve(Curve::custom(|_| f32::NAN)),
        Vec3::ZERO,
        Vec3::ONE,
    );
    assert_eq!(geometry_op(&ch, None, 0.5, ctx(0, 1)), None);
}

#[test]
fn noise_without_sampler_is_identity() {
    let ch = Channel::PositionNoise(noise());
    assert_eq!(geometry_op(&ch, None, 1.0, ctx(0, 4)), None);
    let ch = Channel::AlphaNoise(noise());
    assert_eq!(color_op(&ch, None, 1.0, ctx(0, 4)), None);
}

#[test]
fn noise_is_recentred_and_scaled_by_ratio() {
    let s = Constant(Vec3::new(1.0, 0.5, 0.0));
    let ch = Channel::PositionNoise(noise());
    assert_eq!(
        geometry_op(&ch, Some(&s), 0.5, ctx(0, 1)),
        Some(GeometryOp::Translate(Vec3::new(0.5, 0.0, -0.5)))
    );
    let ch = Channel::ScaleNoise(noise());
    assert_eq!(
        geometry_op(&ch, Some(&s), 1.0, ctx(0, 1)),
        Some(GeometryOp::Scale(Vec3::new(2.0, 1.0, 0.0)))
    );
}

#[test]
fn noise_uv_walks_along_the_text_and_scrolls() {
    let n = noise().with_uv(Vec2::ONE, Vec2::new(0.0, 0.25), Vec2::new(0.5, 0.0));
    let uv = raw_noise(&n, &EchoUv, ctx(1, 4)).unwrap_or(Vec3::NAN);
    assert!((uv - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-6);

    let scrolled = CharacterCtx {
        noise_time: 1.0,
        ..ctx(1, 4)
    };
    let uv = raw_noise(&n, &EchoUv, scrolled).unwrap_or(Vec3::NAN);
    assert!((uv - Vec3::new(0.75, 0.25, 0.0)).length() < 1e-6);

    // 0.25 + 0.5 * 2.0 = 1.25 wraps to 0.25
    let wrapped = CharacterCtx {
        noise_time: 2.0,
        ..ctx(1, 4)
    };
    let uv = raw_noise(&n, &EchoUv, wrapped).unwrap_or(Vec3::NAN);
    assert!((uv - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-6);
}

#[test]
fn non_finite_uv_is_identity() {
    let n = noise().with_uv(Vec2::ONE, Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0));
    let scrolled = CharacterCtx {
        noise_time: 1.0,
        ..ctx(0, 1)
    };
    assert_eq!(raw_noise(&n, &EchoUv, scrolled), None);
}

#[test]
fn color_channel_samples_gradient() {
    let g = Gradient::two(Rgba::new(0.0, 0.0, 0.0, 1.0), Rgba::new(1.0, 1.0, 1.0, 1.0));
    let ch = Channel::color(settled(), g);
    assert_eq!(
        color_op(&ch, None, 0.5, ctx(0, 1)),
        Some(ColorOp::Replace(Rgba::new(0.5, 0.5, 0.5, 1.0)))
    );
}

#[test]
fn alpha_factor_is_clamped() {
    let ch = Channel::alpha(settled(), 0.0, 2.0);
    assert_eq!(
        color_op(&ch, None, 1.0, ctx(0, 1)),
        Some(ColorOp::MultiplyAlpha(1.0))
    );
    assert_eq!(
        color_op(&ch, None, 0.25, ctx(0, 1)),
        Some(ColorOp::MultiplyAlpha(0.5))
    );
}

#[test]
fn alpha_noise_uses_red_component() {
    let s = Constant(Vec3::new(0.5, 1.0, 1.0));
    let ch = Channel::AlphaNoise(noise());
    assert_eq!(
        color_op(&ch, Some(&s), 1.0, ctx(0, 1)),
        Some(ColorOp::SubtractAlpha(127.5))
    );
}
