use crate::foundation::{
    core::{Rgba8, Vec3},
    error::GlyphwaveResult,
};

/// Receiver of animated geometry, typically a GPU mesh upload.
///
/// Ordering contract: within one animation pass `commit` is called once per batch in
/// increasing batch order, after every character of the pass has been written.
pub trait GeometrySink {
    fn commit(&mut self, batch: usize, vertices: &[Vec3], colors: &[Rgba8])
    -> GlyphwaveResult<()>;
}

impl<S: GeometrySink + ?Sized> GeometrySink for &mut S {
    fn commit(
        &mut self,
        batch: usize,
        vertices: &[Vec3],
        colors: &[Rgba8],
    ) -> GlyphwaveResult<()> {
        (**self).commit(batch, vertices, colors)
    }
}

/// One recorded [`GeometrySink::commit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    pub batch: usize,
    pub vertices: Vec<Vec3>,
    pub colors: Vec<Rgba8>,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Latest commit per batch index.
    latest: Vec<Option<Commit>>,
    commits: usize,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of commits received.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// The most recent commit for `batch`.
    pub fn latest(&self, batch: usize) -> Option<&Commit> {
        self.latest.get(batch)?.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest.clear();
        self.commits = 0;
    }
}

impl GeometrySink for InMemorySink {
    fn commit(
        &mut self,
        batch: usize,
        vertices: &[Vec3],
        colors: &[Rgba8],
    ) -> GlyphwaveResult<()> {
        if self.latest.len() <= batch {
            self.latest.resize(batch + 1, None);
        }
        self.latest[batch] = Some(Commit {
            batch,
            vertices: vertices.to_vec(),
            colors: colors.to_vec(),
        });
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
