use crate::{
    animation::{channel::ChannelKind, descriptor::AnimationDescriptor},
    cache::geometry::{GeometryCache, Refresh},
    eval::{
        channels::CharacterCtx,
        plan::ChannelPlan,
        timing::{max_duration, visible_character_count},
    },
    foundation::{
        core::{Quad, QuadColors},
        error::GlyphwaveResult,
    },
    layout::glyph::GlyphLayout,
    output::sink::GeometrySink,
};

/// Playback state of a [`GeometryAnimator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Finished,
}

/// What [`GeometryAnimator::play`] does while already playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Restart from the beginning.
    #[default]
    Restart,
    /// Keep playing; the call is a no-op.
    IgnoreWhilePlaying,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatorOpts {
    pub replay: ReplayPolicy,
    /// Start playing as soon as [`GeometryAnimator::attach`] installs the descriptor.
    pub play_on_attach: bool,
}

/// Why an animation pass did not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoDescriptor,
    /// The layout has no populated buffers or no characters yet; retried next call.
    LayoutNotReady,
    /// Neither playing nor scrubbing.
    Inactive,
    /// `play` while playing under [`ReplayPolicy::IgnoreWhilePlaying`].
    AlreadyPlaying,
}

/// Result of one control call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// An animation pass ran and `batches` batches were committed to the sink.
    Committed { batches: usize },
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Drives a descriptor over a glyph layout and commits the animated quads to a sink.
///
/// The animator owns its layout and sink for its whole lifetime; [`Self::into_parts`] hands
/// them back. Calls are expected once per frame from a single thread. Each control call
/// re-snapshots base geometry at most once and commits each batch at most once.
///
/// Clock rules:
/// - `play` starts at 0, or at the max duration when the playback speed is negative.
/// - `tick` advances by `dt * playback_speed`, wrapping when looping and clamping otherwise.
/// - A non-looping animation finishes once the clock reaches the end it is travelling to.
#[derive(Debug)]
pub struct GeometryAnimator<L, S> {
    layout: L,
    sink: S,
    opts: AnimatorOpts,
    descriptor: Option<AnimationDescriptor>,
    plan: ChannelPlan,
    state: PlaybackState,
    clock: f32,
    max_duration: f32,
    /// Character count `max_duration` was derived for.
    max_for: Option<usize>,
    scrub: Option<f32>,
    noise_time: f32,
    /// Whether the current visible-character cap was set by this animator.
    throttling: bool,
    cache: GeometryCache,
}

impl<L: GlyphLayout, S: GeometrySink> GeometryAnimator<L, S> {
    /// An animator with no descriptor. Every pass is skipped until one is installed.
    pub fn new(layout: L, sink: S, opts: AnimatorOpts) -> Self {
        Self {
            layout,
            sink,
            opts,
            descriptor: None,
            plan: ChannelPlan::default(),
            state: PlaybackState::Idle,
            clock: 0.0,
            max_duration: 0.0,
            max_for: None,
            scrub: None,
            noise_time: 0.0,
            throttling: false,
            cache: GeometryCache::new(),
        }
    }

    /// Build an animator, install `descriptor`, and play it when `opts.play_on_attach` is set.
    pub fn attach(
        layout: L,
        sink: S,
        descriptor: AnimationDescriptor,
        opts: AnimatorOpts,
    ) -> GlyphwaveResult<Self> {
        let mut out = Self::new(layout, sink, opts);
        out.install(descriptor);
        if opts.play_on_attach {
            out.play()?;
        } else {
            out.refresh(true)?;
        }
        Ok(out)
    }

    /// Swap the descriptor wholesale and re-evaluate the current clock against it.
    ///
    /// The descriptor is not validated here; misconfigured channels evaluate as no-ops.
    #[tracing::instrument(level = "debug", skip_all, fields(channels = descriptor.channels.len()))]
    pub fn set_descriptor(
        &mut self,
        descriptor: AnimationDescriptor,
    ) -> GlyphwaveResult<FrameOutcome> {
        self.install(descriptor);
        self.refresh(true)
    }

    /// Start playback from the beginning of the timeline.
    #[tracing::instrument(level = "debug", skip(self), fields(state = ?self.state))]
    pub fn play(&mut self) -> GlyphwaveResult<FrameOutcome> {
        let Some(speed) = self.descriptor.as_ref().map(|d| d.playback_speed) else {
            return Ok(FrameOutcome::Skipped(SkipReason::NoDescriptor));
        };
        if self.state == PlaybackState::Playing
            && self.opts.replay == ReplayPolicy::IgnoreWhilePlaying
        {
            tracing::debug!("already playing");
            return Ok(FrameOutcome::Skipped(SkipReason::AlreadyPlaying));
        }

        self.transition(PlaybackState::Playing);
        self.noise_time = 0.0;
        self.update_max_duration(true);
        self.clock = if speed < 0.0 { self.max_duration } else { 0.0 };
        self.refresh(true)
    }

    /// Stop playback and show the timeline at `normalized_time` (0 = start, 1 = end).
    #[tracing::instrument(level = "debug", skip(self), fields(state = ?self.state))]
    pub fn finish(&mut self, normalized_time: f32) -> GlyphwaveResult<FrameOutcome> {
        if self.descriptor.is_none() {
            return Ok(FrameOutcome::Skipped(SkipReason::NoDescriptor));
        }
        self.transition(PlaybackState::Finished);
        self.update_max_duration(true);
        self.clock = if normalized_time.is_finite() {
            self.max_duration * normalized_time
        } else {
            0.0
        };
        self.refresh(false)
    }

    /// Advance by `delta_time` seconds of host time.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, delta_time: f32) -> GlyphwaveResult<FrameOutcome> {
        if delta_time.is_finite() {
            self.noise_time += delta_time;
        }
        let Some((speed, looping)) = self
            .descriptor
            .as_ref()
            .map(|d| (d.playback_speed, d.looping))
        else {
            return Ok(FrameOutcome::Skipped(SkipReason::NoDescriptor));
        };
        let playing = self.state == PlaybackState::Playing;
        if !playing && self.scrub.is_none() {
            return Ok(FrameOutcome::Skipped(SkipReason::Inactive));
        }

        self.update_max_duration(false);
        if playing && self.scrub.is_none() {
            self.advance(delta_time, speed, looping);
        }
        let outcome = self.refresh(false)?;

        if playing
            && !looping
            && ((speed > 0.0 && self.clock >= self.max_duration)
                || (speed < 0.0 && self.clock <= 0.0))
        {
            self.transition(PlaybackState::Finished);
        }
        Ok(outcome)
    }

    /// Enter scrub mode: the clock follows `progress * max_duration` until
    /// [`Self::stop_scrubbing`].
    pub fn set_progress(&mut self, progress: f32) -> GlyphwaveResult<FrameOutcome> {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.scrub = Some(p);
        self.refresh(false)
    }

    /// Leave scrub mode. The clock keeps its last scrubbed value.
    pub fn stop_scrubbing(&mut self) {
        self.scrub = None;
    }

    /// Tell the animator the layout regenerated (text or style changed).
    ///
    /// Re-derives the max duration for the new character count and re-evaluates the current
    /// clock without touching the playback state.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn notify_layout_changed(&mut self) -> GlyphwaveResult<FrameOutcome> {
        self.update_max_duration(true);
        self.refresh(false)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_some()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn max_duration(&self) -> f32 {
        self.max_duration
    }

    /// Clock as a fraction of the max duration.
    pub fn progress(&self) -> f32 {
        if self.max_duration > 0.0 {
            (self.clock / self.max_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds of noise scroll since the last `play`.
    pub fn noise_time(&self) -> f32 {
        self.noise_time
    }

    pub fn opts(&self) -> AnimatorOpts {
        self.opts
    }

    pub fn descriptor(&self) -> Option<&AnimationDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable access to the layout. Call [`Self::notify_layout_changed`] after regenerating.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn into_parts(self) -> (L, S) {
        (self.layout, self.sink)
    }

    fn install(&mut self, descriptor: AnimationDescriptor) {
        self.plan = ChannelPlan::compile(&descriptor);
        self.descriptor = Some(descriptor);
        self.max_for = None;
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            tracing::debug!(from = ?self.state, to = ?to, clock = self.clock, "playback state");
            self.state = to;
        }
    }

    fn update_max_duration(&mut self, force: bool) {
        let Some(descriptor) = &self.descriptor else {
            return;
        };
        let count = self.layout.character_count();
        if force || self.max_for != Some(count) {
            self.max_duration = max_duration(count, descriptor);
            self.max_for = Some(count);
        }
    }

    fn advance(&mut self, delta_time: f32, speed: f32, looping: bool) {
        let max = self.max_duration;
        if max <= 0.0 || !delta_time.is_finite() {
            return;
        }
        let next = self.clock + delta_time * speed;
        self.clock = if looping {
            let wrapped = next.rem_euclid(max);
            if wrapped >= max { 0.0 } else { wrapped }
        } else {
            next.clamp(0.0, max)
        };
    }

    /// Bring the clock back into `[0, max_duration]` after the max shrank, wrapping when looping.
    fn fit_clock(&mut self) {
        let max = self.max_duration;
        if max.is_nan() || max <= 0.0 || !self.clock.is_finite() {
            self.clock = 0.0;
            return;
        }
        if (0.0..=max).contains(&self.clock) {
            return;
        }
        let looping = self.descriptor.as_ref().is_some_and(|d| d.looping);
        self.clock = if looping {
            let wrapped = self.clock.rem_euclid(max);
            if wrapped >= max { 0.0 } else { wrapped }
        } else {
            self.clock.clamp(0.0, max)
        };
    }

    /// Throttle the layout's visible-character cap to the alpha wave front. Returns whether
    /// the cap changed, in which case the layout regenerated and must be re-snapshotted.
    fn update_visible_cap(&mut self) -> bool {
        let Some(descriptor) = &self.descriptor else {
            return false;
        };
        let wanted = if descriptor.reveal_by_visible_character_count {
            self.throttling = true;
            descriptor
                .channel(ChannelKind::Alpha)
                .and_then(|alpha| visible_character_count(self.clock, alpha.timing()))
        } else if self.throttling {
            self.throttling = false;
            None
        } else {
            return false;
        };

        if self.layout.visible_character_cap() == wanted {
            return false;
        }
        tracing::debug!(cap = ?wanted, clock = self.clock, "visible character cap");
        self.layout.set_visible_character_cap(wanted);
        true
    }

    /// One animation pass: sync the clock, snapshot if needed, evaluate, commit.
    fn refresh(&mut self, force_copy: bool) -> GlyphwaveResult<FrameOutcome> {
        if self.descriptor.is_none() {
            tracing::debug!("no descriptor; skipping frame");
            return Ok(FrameOutcome::Skipped(SkipReason::NoDescriptor));
        }
        self.update_max_duration(false);
        if let Some(p) = self.scrub {
            self.clock = self.max_duration * p;
        } else {
            self.fit_clock();
        }

        let cap_changed = self.update_visible_cap();
        if let Refresh::NotReady = self.cache.refresh(&self.layout, force_copy || cap_changed) {
            tracing::debug!("layout not ready; skipping frame");
            return Ok(FrameOutcome::Skipped(SkipReason::LayoutNotReady));
        }

        self.animate();

        let mut batches = 0;
        for (index, b) in self.cache.batches().iter().enumerate() {
            self.sink
                .commit(index, &b.animated_vertices, &b.animated_colors)?;
            batches += 1;
        }
        Ok(FrameOutcome::Committed { batches })
    }

    /// Rewrite the animated quads of every visible character from the base snapshot.
    fn animate(&mut self) {
        let glyphs = self.layout.glyphs();
        let count = self.layout.character_count().min(glyphs.len());
        let has_geometry = !self.plan.geometry.is_empty();
        let has_color = !self.plan.color.is_empty();

        for (index, glyph) in glyphs.iter().take(count).enumerate() {
            if !glyph.is_visible {
                continue;
            }
            let Some(buffers) = self.cache.batch_mut(glyph.batch_index) else {
                continue;
            };
            let ctx = CharacterCtx {
                index,
                count,
                noise_time: self.noise_time,
            };
            let offset = glyph.vertex_offset;

            if has_geometry && let Some(quad) = Quad::read(&buffers.base_vertices, offset) {
                self.plan
                    .animate_geometry(quad, self.clock, ctx)
                    .write(&mut buffers.animated_vertices, offset);
            }
            if has_color && let Some(colors) = QuadColors::read(&buffers.base_colors, offset) {
                self.plan
                    .animate_colors(colors, self.clock, ctx)
                    .write(&mut buffers.animated_colors, offset);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/animator.rs"]
mod tests;
