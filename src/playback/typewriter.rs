use crate::layout::glyph::GlyphLayout;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypewriterOpts {
    pub seconds_per_character: f32,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for TypewriterOpts {
    fn default() -> Self {
        Self {
            seconds_per_character: 0.1,
            looping: false,
        }
    }
}

/// Reveals text one character at a time by driving the layout's visible-character cap.
///
/// Unlike [`crate::GeometryAnimator`] it never touches vertex data; the layout regenerates
/// its own buffers whenever the cap changes.
#[derive(Debug)]
pub struct TypewriterAnimator<L> {
    layout: L,
    opts: TypewriterOpts,
    time: f32,
    animating: bool,
}

impl<L: GlyphLayout> TypewriterAnimator<L> {
    pub fn new(layout: L, opts: TypewriterOpts) -> Self {
        Self {
            layout,
            opts,
            time: 0.0,
            animating: false,
        }
    }

    /// Start revealing from zero characters. No-op while already animating.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn play(&mut self) {
        if self.animating {
            return;
        }
        self.time = 0.0;
        self.animating = true;
        self.update(0.0);
    }

    /// Reveal everything and stop. No-op unless animating.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn finish(&mut self) {
        if !self.animating {
            return;
        }
        self.animating = false;
        let count = self.layout.character_count();
        self.layout.set_visible_character_cap(Some(count));
        self.time = 0.0;
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, delta_time: f32) {
        if self.animating {
            self.update(delta_time);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn opts(&self) -> TypewriterOpts {
        self.opts
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn into_inner(self) -> L {
        self.layout
    }

    fn update(&mut self, delta_time: f32) {
        let count = self.layout.character_count();
        let spc = self.opts.seconds_per_character;
        if spc.is_nan() || spc <= 0.0 {
            self.finish();
            return;
        }
        let max_time = (count + 1) as f32 * spc;

        if delta_time.is_finite() {
            self.time += delta_time;
        }
        let shown = ((self.time / spc).floor().max(0.0) as usize).min(count);
        if self.layout.visible_character_cap() != Some(shown) {
            self.layout.set_visible_character_cap(Some(shown));
        }

        if self.time > max_time {
            if self.opts.looping {
                self.time %= max_time;
            } else {
                self.finish();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/typewriter.rs"]
mod tests;
