use crate::foundation::{
    core::Rgba,
    error::{GlyphwaveError, GlyphwaveResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    #[default]
    Blend,
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub t: f32,
    pub color: Rgba,
}

/// Color ramp sampled by the color channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    /// Stops sorted by `t`.
    pub stops: Vec<GradientStop>,
    #[serde(default)]
    pub mode: GradientMode,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::solid(Rgba::WHITE)
    }
}

impl Gradient {
    pub fn solid(color: Rgba) -> Self {
        Self {
            stops: vec![GradientStop { t: 0.0, color }],
            mode: GradientMode::Blend,
        }
    }

    pub fn two(from: Rgba, to: Rgba) -> Self {
        Self {
            stops: vec![
                GradientStop { t: 0.0, color: from },
                GradientStop { t: 1.0, color: to },
            ],
            mode: GradientMode::Blend,
        }
    }

    /// Sample at `t`. `t` outside the stop range holds the nearest end stop; an empty
    /// gradient samples as opaque white.
    pub fn evaluate(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::WHITE;
        };

        let idx = self.stops.partition_point(|s| s.t <= t);
        if idx == 0 {
            return first.color;
        }
        if idx >= self.stops.len() {
            return last.color;
        }

        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        match self.mode {
            GradientMode::Fixed => a.color,
            GradientMode::Blend => {
                let span = b.t - a.t;
                if span <= 0.0 {
                    return a.color;
                }
                a.color.lerp(b.color, (t - a.t) / span)
            }
        }
    }

    pub fn validate(&self) -> GlyphwaveResult<()> {
        if self.stops.is_empty() {
            return Err(GlyphwaveError::animation("gradient must have at least one stop"));
        }
        if self.stops.iter().any(|s| !s.t.is_finite()) {
            return Err(GlyphwaveError::animation("gradient stop positions must be finite"));
        }
        if !self.stops.windows(2).all(|w| w[0].t <= w[1].t) {
            return Err(GlyphwaveError::animation("gradient stops must be sorted by t"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/gradient.rs"]
mod tests;
