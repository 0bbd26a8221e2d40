use std::{fmt, sync::Arc};

use crate::{
    animation::ease::Ease,
    foundation::error::{GlyphwaveError, GlyphwaveResult},
    foundation::math::lerp,
};

/// Response curve remapping a channel's linear local progress.
///
/// Outputs are deliberately left unclamped so overshooting curves can push a channel past its
/// `to` value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// A named easing preset.
    Ease(Ease),
    /// Piecewise-linear keys sorted by `t`, held flat outside the key range.
    /// An empty key list behaves like [`Ease::Linear`].
    Keys(Vec<CurveKey>),
    /// Ignores progress.
    Constant(f32),
    /// Host-supplied function. Not serializable.
    #[serde(skip)]
    Custom(CurveFn),
}

impl Default for Curve {
    fn default() -> Self {
        Self::Ease(Ease::Linear)
    }
}

/// One key of a [`Curve::Keys`] curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveKey {
    pub t: f32,
    pub value: f32,
}

impl CurveKey {
    pub fn new(t: f32, value: f32) -> Self {
        Self { t, value }
    }
}

/// Shared handle to a host curve function.
#[derive(Clone)]
pub struct CurveFn(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl CurveFn {
    pub fn new(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CurveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CurveFn(..)")
    }
}

impl Curve {
    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self::Custom(CurveFn::new(f))
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Self::Ease(ease) => ease.apply(t),
            Self::Keys(keys) => sample_keys(keys, t),
            Self::Constant(v) => *v,
            Self::Custom(f) => (f.0)(t),
        }
    }

    pub fn validate(&self) -> GlyphwaveResult<()> {
        match self {
            Self::Ease(_) | Self::Custom(_) => Ok(()),
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(GlyphwaveError::animation("constant curve must be finite"));
                }
                Ok(())
            }
            Self::Keys(keys) => {
                if keys.iter().any(|k| !k.t.is_finite() || !k.value.is_finite()) {
                    return Err(GlyphwaveError::animation("curve keys must be finite"));
                }
                if !keys.windows(2).all(|w| w[0].t <= w[1].t) {
                    return Err(GlyphwaveError::animation("curve keys must be sorted by t"));
                }
                Ok(())
            }
        }
    }
}

fn sample_keys(keys: &[CurveKey], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return t;
    };

    let idx = keys.partition_point(|k| k.t <= t);
    if idx == 0 {
        return first.value;
    }
    if idx >= keys.len() {
        return last.value;
    }

    let a = keys[idx - 1];
    let b = keys[idx];
    let span = b.t - a.t;
    if span <= 0.0 {
        return a.value;
    }
    lerp(a.value, b.value, (t - a.t) / span)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
