use std::{fmt, sync::Arc};

use crate::{
    animation::{
        curve::Curve,
        gradient::Gradient,
        noise::{NoiseSampler, NoiseSource},
    },
    foundation::{
        core::{Vec2, Vec3},
        error::{GlyphwaveError, GlyphwaveResult},
    },
};

/// Timing fields shared by every channel.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    pub enabled: bool,
    /// Seconds before character 0 starts.
    pub delay: f32,
    /// Extra start delay per character index, in seconds.
    pub wave_per_character: f32,
    /// Seconds one character takes once its wave front reaches it. Zero means an instant step.
    pub duration: f32,
    pub curve: Curve,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 0.0,
            wave_per_character: 0.0,
            duration: 0.0,
            curve: Curve::default(),
        }
    }
}

impl Timing {
    pub fn new(delay: f32, wave_per_character: f32, duration: f32) -> Self {
        Self {
            delay,
            wave_per_character,
            duration,
            ..Self::default()
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn validate(&self) -> GlyphwaveResult<()> {
        for (name, v) in [
            ("delay", self.delay),
            ("wave_per_character", self.wave_per_character),
            ("duration", self.duration),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GlyphwaveError::validation(format!(
                    "channel {name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        self.curve.validate()
    }
}

/// A channel interpolating between two values of `T`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FromTo<T> {
    #[serde(flatten)]
    pub timing: Timing,
    pub from: T,
    pub to: T,
}

/// The color channel: sample a gradient at the curve output.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GradientChannel {
    #[serde(flatten)]
    pub timing: Timing,
    pub gradient: Gradient,
}

/// A channel driven by a 2D noise lookup scrolled over time.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct NoiseChannel {
    #[serde(flatten)]
    pub timing: Timing,
    #[serde(default)]
    pub source: NoiseSource,
    /// Runtime sampler; takes precedence over `source`.
    #[serde(skip)]
    pub sampler: Option<Arc<dyn NoiseSampler>>,
    #[serde(default = "unit_tiling")]
    pub tiling: Vec2,
    #[serde(default)]
    pub offset: Vec2,
    /// UV scroll per second of noise clock.
    #[serde(default)]
    pub scroll_speed: Vec2,
}

fn unit_tiling() -> Vec2 {
    Vec2::ONE
}

impl fmt::Debug for NoiseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseChannel")
            .field("timing", &self.timing)
            .field("source", &self.source)
            .field("sampler", &self.sampler)
            .field("tiling", &self.tiling)
            .field("offset", &self.offset)
            .field("scroll_speed", &self.scroll_speed)
            .finish()
    }
}

impl NoiseChannel {
    pub fn new(timing: Timing, source: NoiseSource) -> Self {
        Self {
            timing,
            source,
            sampler: None,
            tiling: Vec2::ONE,
            offset: Vec2::ZERO,
            scroll_speed: Vec2::ZERO,
        }
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn NoiseSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn with_uv(mut self, tiling: Vec2, offset: Vec2, scroll_speed: Vec2) -> Self {
        self.tiling = tiling;
        self.offset = offset;
        self.scroll_speed = scroll_speed;
        self
    }

    /// The sampler evaluation should use, if any.
    pub fn resolve_sampler(&self) -> Option<Arc<dyn NoiseSampler>> {
        self.sampler.clone().or_else(|| self.source.build())
    }
}

/// Every animatable property. Declaration order is evaluation order within each pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelKind {
    Position,
    Rotation,
    Scale,
    PositionNoise,
    RotationNoise,
    ScaleNoise,
    Color,
    ColorNoise,
    Alpha,
    AlphaNoise,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 10] = [
        ChannelKind::Position,
        ChannelKind::Rotation,
        ChannelKind::Scale,
        ChannelKind::PositionNoise,
        ChannelKind::RotationNoise,
        ChannelKind::ScaleNoise,
        ChannelKind::Color,
        ChannelKind::ColorNoise,
        ChannelKind::Alpha,
        ChannelKind::AlphaNoise,
    ];

    /// Geometry channels touch vertex positions; the rest touch vertex colors.
    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Self::Position
                | Self::Rotation
                | Self::Scale
                | Self::PositionNoise
                | Self::RotationNoise
                | Self::ScaleNoise
        )
    }
}

/// One configured channel.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Translation added to all four corners.
    Position(FromTo<Vec3>),
    /// Euler angles in degrees, applied about the pivot.
    Rotation(FromTo<Vec3>),
    /// Per-axis scale about the pivot.
    Scale(FromTo<Vec2>),
    /// Opacity multiplier.
    Alpha(FromTo<f32>),
    Color(GradientChannel),
    PositionNoise(NoiseChannel),
    RotationNoise(NoiseChannel),
    ScaleNoise(NoiseChannel),
    ColorNoise(NoiseChannel),
    AlphaNoise(NoiseChannel),
}

impl Channel {
    pub fn position(timing: Timing, from: Vec3, to: Vec3) -> Self {
        Self::Position(FromTo { timing, from, to })
    }

    pub fn rotation(timing: Timing, from: Vec3, to: Vec3) -> Self {
        Self::Rotation(FromTo { timing, from, to })
    }

    pub fn scale(timing: Timing, from: Vec2, to: Vec2) -> Self {
        Self::Scale(FromTo { timing, from, to })
    }

    pub fn alpha(timing: Timing, from: f32, to: f32) -> Self {
        Self::Alpha(FromTo { timing, from, to })
    }

    pub fn color(timing: Timing, gradient: Gradient) -> Self {
        Self::Color(GradientChannel { timing, gradient })
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Position(_) => ChannelKind::Position,
            Self::Rotation(_) => ChannelKind::Rotation,
            Self::Scale(_) => ChannelKind::Scale,
            Self::Alpha(_) => ChannelKind::Alpha,
            Self::Color(_) => ChannelKind::Color,
            Self::PositionNoise(_) => ChannelKind::PositionNoise,
            Self::RotationNoise(_) => ChannelKind::RotationNoise,
            Self::ScaleNoise(_) => ChannelKind::ScaleNoise,
            Self::ColorNoise(_) => ChannelKind::ColorNoise,
            Self::AlphaNoise(_) => ChannelKind::AlphaNoise,
        }
    }

    pub fn timing(&self) -> &Timing {
        match self {
            Self::Position(c) | Self::Rotation(c) => &c.timing,
            Self::Scale(c) => &c.timing,
            Self::Alpha(c) => &c.timing,
            Self::Color(c) => &c.timing,
            Self::PositionNoise(c)
            | Self::RotationNoise(c)
            | Self::ScaleNoise(c)
            | Self::ColorNoise(c)
            | Self::AlphaNoise(c) => &c.timing,
        }
    }

    pub fn timing_mut(&mut self) -> &mut Timing {
        match self {
            Self::Position(c) | Self::Rotation(c) => &mut c.timing,
            Self::Scale(c) => &mut c.timing,
            Self::Alpha(c) => &mut c.timing,
            Self::Color(c) => &mut c.timing,
            Self::PositionNoise(c)
            | Self::RotationNoise(c)
            | Self::ScaleNoise(c)
            | Self::ColorNoise(c)
            | Self::AlphaNoise(c) => &mut c.timing,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.timing().enabled
    }

    pub fn noise(&self) -> Option<&NoiseChannel> {
        match self {
            Self::PositionNoise(c)
            | Self::RotationNoise(c)
            | Self::ScaleNoise(c)
            | Self::ColorNoise(c)
            | Self::AlphaNoise(c) => Some(c),
            _ => None,
        }
    }

    pub fn noise_mut(&mut self) -> Option<&mut NoiseChannel> {
        match self {
            Self::PositionNoise(c)
            | Self::RotationNoise(c)
            | Self::ScaleNoise(c)
            | Self::ColorNoise(c)
            | Self::AlphaNoise(c) => Some(c),
            _ => None,
        }
    }

    pub fn validate(&self) -> GlyphwaveResult<()> {
        self.timing().validate()?;
        match self {
            Self::Position(c) | Self::Rotation(c) => {
                if !c.from.is_finite() || !c.to.is_finite() {
                    return Err(GlyphwaveError::validation(format!(
                        "{:?} from/to must be finite",
                        self.kind()
                    )));
                }
            }
            Self::Scale(c) => {
                if !c.from.is_finite() || !c.to.is_finite() {
                    return Err(GlyphwaveError::validation("Scale from/to must be finite"));
                }
            }
            Self::Alpha(c) => {
                if !c.from.is_finite() || !c.to.is_finite() {
                    return Err(GlyphwaveError::validation("Alpha from/to must be finite"));
                }
            }
            Self::Color(c) => c.gradient.validate()?,
            Self::PositionNoise(c)
            | Self::RotationNoise(c)
            | Self::ScaleNoise(c)
            | Self::ColorNoise(c)
            | Self::AlphaNoise(c) => {
                if !c.tiling.is_finite() || !c.offset.is_finite() || !c.scroll_speed.is_finite() {
                    return Err(GlyphwaveError::validation(format!(
                        "{:?} uv parameters must be finite",
                        self.kind()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/channel.rs"]
mod tests;
