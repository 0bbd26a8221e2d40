use crate::{
    foundation::core::{Quad, QuadColors, Rgba8, Vec2, Vec3},
    layout::glyph::{BatchMesh, BufferToken, GlyphInfo, GlyphLayout},
};

/// Options for [`FixedLayout`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FixedLayoutOpts {
    /// Horizontal pen advance per character.
    pub advance: f32,
    pub line_height: f32,
    /// Quad width and height.
    pub glyph_size: Vec2,
    /// Visible characters are dealt round-robin across this many batches.
    pub batch_count: usize,
    pub color: Rgba8,
}

impl Default for FixedLayoutOpts {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 20.0,
            glyph_size: Vec2::new(8.0, 16.0),
            batch_count: 1,
            color: Rgba8::WHITE,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Batch {
    vertices: Vec<Vec3>,
    colors: Vec<Rgba8>,
}

/// In-memory fixed-advance layout.
///
/// Whitespace is invisible, `\n` starts a new line (y grows downward in whole lines, quads
/// grow upward from the baseline). Every regeneration bumps a generation counter that is
/// handed out as the [`BufferToken`] of all batches.
#[derive(Clone, Debug)]
pub struct FixedLayout {
    text: Vec<char>,
    opts: FixedLayoutOpts,
    cap: Option<usize>,
    ready: bool,
    generation: u64,
    glyphs: Vec<GlyphInfo>,
    batches: Vec<Batch>,
}

impl FixedLayout {
    pub fn new(text: &str, opts: FixedLayoutOpts) -> Self {
        let mut out = Self {
            text: text.chars().collect(),
            opts: FixedLayoutOpts {
                batch_count: opts.batch_count.max(1),
                ..opts
            },
            cap: None,
            ready: true,
            generation: 0,
            glyphs: Vec::new(),
            batches: Vec::new(),
        };
        out.regenerate();
        out
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.regenerate();
    }

    /// While not ready, [`GlyphLayout::batch`] reports every batch as unpopulated.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild all buffers from the current text and cap.
    pub fn regenerate(&mut self) {
        self.generation += 1;
        self.glyphs.clear();
        self.batches = vec![Batch::default(); self.opts.batch_count];

        let FixedLayoutOpts {
            advance,
            line_height,
            glyph_size,
            batch_count,
            color,
        } = self.opts;

        let mut pen = Vec2::ZERO;
        let mut dealt = 0usize;
        for (i, &ch) in self.text.iter().enumerate() {
            if ch == '\n' {
                pen = Vec2::new(0.0, pen.y - line_height);
                self.glyphs.push(GlyphInfo {
                    batch_index: 0,
                    vertex_offset: 0,
                    is_visible: false,
                });
                continue;
            }
            if ch.is_whitespace() {
                pen.x += advance;
                self.glyphs.push(GlyphInfo {
                    batch_index: 0,
                    vertex_offset: 0,
                    is_visible: false,
                });
                continue;
            }

            let batch_index = dealt % batch_count;
            dealt += 1;
            let batch = &mut self.batches[batch_index];
            let vertex_offset = batch.vertices.len();
            let shown = self.cap.is_none_or(|cap| i < cap);

            let (quad, quad_colors) = if shown {
                let x0 = pen.x;
                let y0 = pen.y;
                let x1 = x0 + glyph_size.x;
                let y1 = y0 + glyph_size.y;
                (
                    Quad([
                        Vec3::new(x0, y0, 0.0),
                        Vec3::new(x0, y1, 0.0),
                        Vec3::new(x1, y1, 0.0),
                        Vec3::new(x1, y0, 0.0),
                    ]),
                    QuadColors::uniform(color),
                )
            } else {
                let origin = Vec3::new(pen.x, pen.y, 0.0);
                (
                    Quad([origin; 4]),
                    QuadColors::uniform(color.with_alpha(0)),
                )
            };
            batch.vertices.extend_from_slice(&quad.0);
            batch.colors.extend_from_slice(&quad_colors.0);

            self.glyphs.push(GlyphInfo {
                batch_index,
                vertex_offset,
                is_visible: shown,
            });
            pen.x += advance;
        }
    }
}

impl GlyphLayout for FixedLayout {
    fn character_count(&self) -> usize {
        self.text.len()
    }

    fn glyphs(&self) -> &[GlyphInfo] {
        &self.glyphs
    }

    fn batch_count(&self) -> usize {
        self.batches.len()
    }

    fn batch(&self, index: usize) -> Option<BatchMesh<'_>> {
        if !self.ready {
            return None;
        }
        let b = self.batches.get(index)?;
        Some(BatchMesh {
            token: BufferToken(self.generation),
            vertices: &b.vertices,
            colors: &b.colors,
        })
    }

    fn visible_character_cap(&self) -> Option<usize> {
        self.cap
    }

    fn set_visible_character_cap(&mut self, cap: Option<usize>) {
        if self.cap != cap {
            self.cap = cap;
            self.regenerate();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fixed.rs"]
mod tests;
