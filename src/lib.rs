//! Glyphwave animates laid-out text one glyph quad at a time.
//!
//! A host text engine exposes its quads through [`GlyphLayout`]; an [`AnimationDescriptor`]
//! lists channels (position, rotation, scale, color, alpha and their noise variants) whose start
//! is staggered per character so a wave sweeps across the text. [`GeometryAnimator`] evaluates
//! the descriptor every frame and hands the animated buffers to a [`GeometrySink`].
//!
//! - Build a descriptor with [`DescriptorBuilder`] or load one with
//!   [`AnimationDescriptor::from_path`]
//! - Attach it to a layout and a sink with [`GeometryAnimator::attach`]
//! - Call [`GeometryAnimator::tick`] once per frame
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod cache;
pub mod eval;
pub mod layout;
pub mod output;
pub mod playback;

pub use crate::foundation::core::{EulerRot, Quad, QuadColors, Quat, Rgba, Rgba8, Vec2, Vec3};
pub use crate::foundation::error::{GlyphwaveError, GlyphwaveResult};

pub use crate::animation::channel::{
    Channel, ChannelKind, FromTo, GradientChannel, NoiseChannel, Timing,
};
pub use crate::animation::curve::{Curve, CurveFn, CurveKey};
pub use crate::animation::descriptor::AnimationDescriptor;
pub use crate::animation::dsl::{DescriptorBuilder, value_noise};
pub use crate::animation::ease::Ease;
pub use crate::animation::gradient::{Gradient, GradientMode, GradientStop};
pub use crate::animation::noise::{ImageNoise, NoiseSampler, NoiseSource, ValueNoise};
pub use crate::cache::geometry::{BatchBuffers, GeometryCache, Refresh};
pub use crate::layout::fixed::{FixedLayout, FixedLayoutOpts};
pub use crate::layout::glyph::{BatchMesh, BufferToken, GlyphInfo, GlyphLayout};
pub use crate::playback::animator::{
    AnimatorOpts, FrameOutcome, GeometryAnimator, PlaybackState, ReplayPolicy, SkipReason,
};
pub use crate::playback::typewriter::{TypewriterAnimator, TypewriterOpts};
pub use crate::output::sink::{Commit, GeometrySink, InMemorySink};
