use std::sync::Arc;

use crate::{
    animation::{
        channel::{Channel, ChannelKind},
        descriptor::AnimationDescriptor,
        noise::NoiseSampler,
    },
    eval::{
        channels::{CharacterCtx, color_op, geometry_op},
        compositor::{animate_colors, animate_geometry},
    },
    foundation::core::{Quad, QuadColors, Vec2},
};

/// One enabled channel with its sampler resolved.
#[derive(Clone, Debug)]
pub struct Stage {
    pub channel: Channel,
    pub sampler: Option<Arc<dyn NoiseSampler>>,
}

impl Stage {
    pub fn kind(&self) -> ChannelKind {
        self.channel.kind()
    }
}

/// A descriptor compiled for per-frame evaluation.
///
/// Disabled channels are dropped, noise samplers are resolved once, and the remaining stages
/// are sorted into the fixed geometry and color pipeline orders.
#[derive(Clone, Debug, Default)]
pub struct ChannelPlan {
    pub pivot: Vec2,
    pub geometry: Vec<Stage>,
    pub color: Vec<Stage>,
}

impl ChannelPlan {
    #[tracing::instrument(level = "debug", skip_all, fields(channels = descriptor.channels.len()))]
    pub fn compile(descriptor: &AnimationDescriptor) -> Self {
        let mut stages: Vec<Stage> = Vec::with_capacity(descriptor.channels.len());
        for channel in descriptor.channels.iter().filter(|c| c.is_enabled()) {
            let sampler = match channel.noise() {
                Some(noise) => match noise.resolve_sampler() {
                    Some(s) => Some(s),
                    None => {
                        tracing::warn!(
                            kind = ?channel.kind(),
                            "noise channel has no sampler; it will not animate"
                        );
                        continue;
                    }
                },
                None => None,
            };
            stages.push(Stage {
                channel: channel.clone(),
                sampler,
            });
        }
        stages.sort_by_key(Stage::kind);

        let (geometry, color): (Vec<_>, Vec<_>) =
            stages.into_iter().partition(|s| s.kind().is_geometry());
        Self {
            pivot: descriptor.pivot,
            geometry,
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty() && self.color.is_empty()
    }

    /// Run the geometry pipeline over `quad` at `clock`.
    pub fn animate_geometry(&self, quad: Quad, clock: f32, ctx: CharacterCtx) -> Quad {
        let ops = self
            .geometry
            .iter()
            .filter_map(|s| geometry_op(&s.channel, s.sampler.as_deref(), clock, ctx));
        animate_geometry(quad, ops, self.pivot)
    }

    /// Run the color pipeline over `colors` at `clock`.
    pub fn animate_colors(
        &self,
        colors: QuadColors,
        clock: f32,
        ctx: CharacterCtx,
    ) -> QuadColors {
        let ops = self
            .color
            .iter()
            .filter_map(|s| color_op(&s.channel, s.sampler.as_deref(), clock, ctx));
        animate_colors(colors, ops)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/plan.rs"]
mod tests;
