//! Global clock to per-character progress.
//!
//! Character `k` of a channel starts at `delay + k * wave_per_character` and takes `duration`
//! seconds to reach full progress, which sweeps a wave front across the text.

use crate::animation::{channel::Timing, descriptor::AnimationDescriptor};

/// Time from clock 0 until the last character of this channel settles.
pub fn total_duration(character_count: usize, timing: &Timing) -> f32 {
    if !timing.enabled || character_count == 0 {
        return 0.0;
    }
    timing.delay + (character_count - 1) as f32 * timing.wave_per_character + timing.duration
}

/// Longest [`total_duration`] over all channels.
pub fn max_duration(character_count: usize, descriptor: &AnimationDescriptor) -> f32 {
    descriptor
        .channels
        .iter()
        .map(|c| total_duration(character_count, c.timing()))
        .filter(|d| d.is_finite())
        .fold(0.0, f32::max)
}

/// Linear progress of character `character_index` at `clock`, in `[0, 1]`.
pub fn local_progress(clock: f32, character_index: usize, timing: &Timing) -> f32 {
    if clock < timing.delay {
        return 0.0;
    }
    if timing.duration <= 0.0 {
        return 1.0;
    }
    let start = timing.delay + character_index as f32 * timing.wave_per_character;
    let p = (clock - start) / timing.duration;
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

/// How many characters the wave front has reached at `clock`; `None` when the channel has
/// no wave, which leaves every character eligible.
pub fn visible_character_count(clock: f32, timing: &Timing) -> Option<usize> {
    if timing.wave_per_character <= 0.0 {
        return None;
    }
    let reached = ((clock - timing.delay) / timing.wave_per_character).floor() + 1.0;
    if reached.is_nan() || reached <= 0.0 {
        return Some(0);
    }
    Some(reached.min(usize::MAX as f32) as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timing.rs"]
mod tests;
