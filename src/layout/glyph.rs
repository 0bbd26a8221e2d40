use crate::foundation::core::{Rgba8, Vec3};

/// Identity of one batch's vertex/color buffers.
///
/// A layout hands out a new token whenever it regenerates a batch's buffers, so the geometry
/// cache can decide whether to re-snapshot with a value comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BufferToken(pub u64);

/// Where a character's quad lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphInfo {
    /// Render batch (material) the quad belongs to.
    pub batch_index: usize,
    /// Index of the first of the quad's four vertices within that batch.
    pub vertex_offset: usize,
    pub is_visible: bool,
}

/// Read-only view of one batch's current base geometry.
#[derive(Clone, Copy, Debug)]
pub struct BatchMesh<'a> {
    pub token: BufferToken,
    pub vertices: &'a [Vec3],
    pub colors: &'a [Rgba8],
}

/// The text layout collaborator.
///
/// Implementations own shaping and line breaking; the animator only reads the resulting quads
/// and, when asked to, throttles how many characters the layout shows.
pub trait GlyphLayout {
    /// Number of characters in the laid-out text, visible or not.
    fn character_count(&self) -> usize;

    /// Per-character placement. May be shorter than `character_count` while the layout is
    /// still catching up.
    fn glyphs(&self) -> &[GlyphInfo];

    fn batch_count(&self) -> usize;

    /// Current buffers of batch `index`, or `None` if not populated yet.
    fn batch(&self, index: usize) -> Option<BatchMesh<'_>>;

    /// Current visible-character cap (`None` means unlimited).
    fn visible_character_cap(&self) -> Option<usize> {
        None
    }

    /// Change the visible-character cap. Implementations regenerate their buffers before
    /// returning so the next animation pass sees the capped geometry.
    fn set_visible_character_cap(&mut self, _cap: Option<usize>) {}
}
