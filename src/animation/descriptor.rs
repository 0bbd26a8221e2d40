use std::path::Path;

use crate::{
    animation::channel::{Channel, ChannelKind},
    foundation::{
        core::Vec2,
        error::{GlyphwaveError, GlyphwaveResult},
    },
};

/// Complete description of one text animation.
///
/// A descriptor is plain data: it can be built in code (see [`crate::DescriptorBuilder`]) or
/// loaded from JSON. It is treated as immutable while installed in an animator; swap it
/// wholesale with [`crate::GeometryAnimator::set_descriptor`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AnimationDescriptor {
    /// Clock advance per second of `tick` time. Negative plays backwards.
    #[serde(default = "default_speed")]
    pub playback_speed: f32,
    /// Normalized anchor inside each glyph quad for rotation and scale.
    #[serde(default = "default_pivot")]
    pub pivot: Vec2,
    /// Wrap the clock instead of finishing.
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Throttle the host's visible-character cap to the alpha wave front, so decorative
    /// geometry (underlines, strikethrough) does not show ahead of the reveal.
    #[serde(default)]
    pub reveal_by_visible_character_count: bool,
    /// At most one channel per [`ChannelKind`].
    #[serde(default)]
    pub channels: Vec<Channel>,
}

fn default_speed() -> f32 {
    1.0
}

fn default_pivot() -> Vec2 {
    Vec2::splat(0.5)
}

impl Default for AnimationDescriptor {
    fn default() -> Self {
        Self {
            playback_speed: default_speed(),
            pivot: default_pivot(),
            looping: false,
            reveal_by_visible_character_count: false,
            channels: Vec::new(),
        }
    }
}

impl AnimationDescriptor {
    pub fn channel(&self, kind: ChannelKind) -> Option<&Channel> {
        self.channels.iter().find(|c| c.kind() == kind)
    }

    pub fn channel_mut(&mut self, kind: ChannelKind) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn validate(&self) -> GlyphwaveResult<()> {
        if !self.playback_speed.is_finite() {
            return Err(GlyphwaveError::validation("playback_speed must be finite"));
        }
        if !(0.0..=1.0).contains(&self.pivot.x) || !(0.0..=1.0).contains(&self.pivot.y) {
            return Err(GlyphwaveError::validation(format!(
                "pivot must lie in [0, 1]^2 (got {}, {})",
                self.pivot.x, self.pivot.y
            )));
        }
        let mut seen = Vec::with_capacity(self.channels.len());
        for c in &self.channels {
            let kind = c.kind();
            if seen.contains(&kind) {
                return Err(GlyphwaveError::validation(format!(
                    "duplicate channel {kind:?}"
                )));
            }
            seen.push(kind);
            c.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a descriptor from JSON.
    pub fn from_json_str(s: &str) -> GlyphwaveResult<Self> {
        let d: Self = serde_json::from_str(s).map_err(|e| GlyphwaveError::serde(e.to_string()))?;
        d.validate()?;
        Ok(d)
    }

    /// Read, parse and validate a descriptor JSON file.
    pub fn from_path(path: &Path) -> GlyphwaveResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            GlyphwaveError::Other(
                anyhow::Error::new(e).context(format!("read descriptor '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string(&self) -> GlyphwaveResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GlyphwaveError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/descriptor.rs"]
mod tests;
