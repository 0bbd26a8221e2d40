//! Geometry Cache Manager.
//!
//! Owns the per-batch base snapshot and the animated buffers that are committed to the sink.
//! A batch is re-snapshotted only when its [`BufferToken`] changes, the character count
//! changes, its length changes, or the caller forces it.

use crate::{
    foundation::core::{Rgba8, Vec3},
    layout::glyph::{BatchMesh, BufferToken, GlyphLayout},
};

/// Base and animated buffers of one render batch.
#[derive(Clone, Debug, Default)]
pub struct BatchBuffers {
    token: Option<BufferToken>,
    pub base_vertices: Vec<Vec3>,
    pub base_colors: Vec<Rgba8>,
    pub animated_vertices: Vec<Vec3>,
    pub animated_colors: Vec<Rgba8>,
}

impl BatchBuffers {
    /// Token of the layout buffers last copied in, if any.
    pub fn token(&self) -> Option<BufferToken> {
        self.token
    }

    /// Re-snapshot from `mesh` if needed. Returns whether a copy happened.
    pub fn refresh(
        &mut self,
        mesh: BatchMesh<'_>,
        character_count_changed: bool,
        force_copy: bool,
    ) -> bool {
        let stale = force_copy
            || character_count_changed
            || self.token != Some(mesh.token)
            || self.animated_vertices.len() != mesh.vertices.len()
            || self.animated_colors.len() != mesh.colors.len();
        if !stale {
            return false;
        }

        self.token = Some(mesh.token);
        copy_into(&mut self.base_vertices, mesh.vertices);
        copy_into(&mut self.base_colors, mesh.colors);
        copy_into(&mut self.animated_vertices, mesh.vertices);
        copy_into(&mut self.animated_colors, mesh.colors);
        true
    }
}

fn copy_into<T: Copy>(dst: &mut Vec<T>, src: &[T]) {
    dst.clear();
    dst.extend_from_slice(src);
}

/// Result of [`GeometryCache::refresh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// The layout has no populated buffers yet, or no characters.
    NotReady,
    /// Buffers are valid; `copied` batches were re-snapshotted.
    Ready { copied: usize },
}

impl Refresh {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

#[derive(Clone, Debug, Default)]
pub struct GeometryCache {
    batches: Vec<BatchBuffers>,
    character_count: Option<usize>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow or shrink to `batch_count` batches. New batches start empty.
    pub fn ensure_buffers(&mut self, batch_count: usize) {
        self.batches.resize_with(batch_count, BatchBuffers::default);
    }

    /// Bring every batch in line with `layout`.
    ///
    /// Nothing is touched when any batch is unpopulated, so a half-ready layout never leaves
    /// the cache partially refreshed.
    pub fn refresh<L: GlyphLayout + ?Sized>(&mut self, layout: &L, force_copy: bool) -> Refresh {
        let character_count = layout.character_count();
        if character_count == 0 {
            return Refresh::NotReady;
        }
        let batch_count = layout.batch_count();
        if (0..batch_count).any(|i| layout.batch(i).is_none()) {
            return Refresh::NotReady;
        }

        let count_changed = self.character_count != Some(character_count);
        self.ensure_buffers(batch_count);
        let mut copied = 0;
        for (i, buffers) in self.batches.iter_mut().enumerate() {
            let Some(mesh) = layout.batch(i) else {
                return Refresh::NotReady;
            };
            if buffers.refresh(mesh, count_changed, force_copy) {
                copied += 1;
            }
        }
        self.character_count = Some(character_count);

        if copied > 0 {
            tracing::debug!(copied, character_count, "re-snapshotted base geometry");
        }
        Refresh::Ready { copied }
    }

    /// Character count seen by the last successful refresh.
    pub fn character_count(&self) -> Option<usize> {
        self.character_count
    }

    pub fn batches(&self) -> &[BatchBuffers] {
        &self.batches
    }

    pub fn batch(&self, index: usize) -> Option<&BatchBuffers> {
        self.batches.get(index)
    }

    pub fn batch_mut(&mut self, index: usize) -> Option<&mut BatchBuffers> {
        self.batches.get_mut(index)
    }

    /// Drop all buffers; the next refresh re-snapshots everything.
    pub fn clear(&mut self) {
        self.batches.clear();
        self.character_count = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/geometry.rs"]
mod tests;
