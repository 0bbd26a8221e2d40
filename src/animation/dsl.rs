use std::sync::Arc;

use crate::{
    animation::{
        channel::{Channel, NoiseChannel, Timing},
        descriptor::AnimationDescriptor,
        gradient::Gradient,
        noise::{NoiseSampler, NoiseSource},
    },
    foundation::{
        core::{Vec2, Vec3},
        error::{GlyphwaveError, GlyphwaveResult},
    },
};

/// Fluent builder for [`AnimationDescriptor`]. `build` validates.
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    descriptor: AnimationDescriptor,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playback_speed(mut self, speed: f32) -> Self {
        self.descriptor.playback_speed = speed;
        self
    }

    pub fn pivot(mut self, pivot: Vec2) -> Self {
        self.descriptor.pivot = pivot;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.descriptor.looping = looping;
        self
    }

    pub fn reveal_by_visible_character_count(mut self, on: bool) -> Self {
        self.descriptor.reveal_by_visible_character_count = on;
        self
    }

    pub fn channel(mut self, channel: Channel) -> GlyphwaveResult<Self> {
        let kind = channel.kind();
        if self.descriptor.channel(kind).is_some() {
            return Err(GlyphwaveError::validation(format!(
                "duplicate channel {kind:?}"
            )));
        }
        self.descriptor.channels.push(channel);
        Ok(self)
    }

    pub fn position(self, timing: Timing, from: Vec3, to: Vec3) -> GlyphwaveResult<Self> {
        self.channel(Channel::position(timing, from, to))
    }

    pub fn rotation(self, timing: Timing, from: Vec3, to: Vec3) -> GlyphwaveResult<Self> {
        self.channel(Channel::rotation(timing, from, to))
    }

    pub fn scale(self, timing: Timing, from: Vec2, to: Vec2) -> GlyphwaveResult<Self> {
        self.channel(Channel::scale(timing, from, to))
    }

    pub fn alpha(self, timing: Timing, from: f32, to: f32) -> GlyphwaveResult<Self> {
        self.channel(Channel::alpha(timing, from, to))
    }

    pub fn color(self, timing: Timing, gradient: Gradient) -> GlyphwaveResult<Self> {
        self.channel(Channel::color(timing, gradient))
    }

    /// Attach a runtime sampler to an already-added noise channel of the same kind.
    pub fn noise_sampler(
        mut self,
        kind: crate::animation::channel::ChannelKind,
        sampler: Arc<dyn NoiseSampler>,
    ) -> GlyphwaveResult<Self> {
        let Some(channel) = self.descriptor.channel_mut(kind) else {
            return Err(GlyphwaveError::validation(format!(
                "no {kind:?} channel to attach a sampler to"
            )));
        };
        let Some(noise) = channel.noise_mut() else {
            return Err(GlyphwaveError::validation(format!(
                "{kind:?} is not a noise channel"
            )));
        };
        noise.sampler = Some(sampler);
        Ok(self)
    }

    pub fn build(self) -> GlyphwaveResult<AnimationDescriptor> {
        self.descriptor.validate()?;
        Ok(self.descriptor)
    }
}

/// Shorthand for a noise channel with procedural value noise.
pub fn value_noise(timing: Timing, seed: u64) -> NoiseChannel {
    NoiseChannel::new(timing, NoiseSource::Value { seed, cells: 8 })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/dsl.rs"]
mod tests;
