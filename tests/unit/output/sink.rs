use super::*;
use crate::foundation::error::GlyphwaveError;

#[test]
fn in_memory_sink_keeps_latest_per_batch() {
    let mut sink = InMemorySink::new();
    sink.commit(1, &[Vec3::X; 4], &[Rgba8::WHITE; 4]).unwrap();
    sink.commit(1, &[Vec3::Y; 4], &[Rgba8::WHITE; 4]).unwrap();
    assert_eq!(sink.commit_count(), 2);
    assert!(sink.latest(0).is_none());
    let c = sink.latest(1).unwrap();
    assert_eq!(c.batch, 1);
    assert_eq!(c.vertices, vec![Vec3::Y; 4]);

    sink.clear();
    assert_eq!(sink.commit_count(), 0);
    assert!(sink.latest(1).is_none());
}

struct Failing;

impl GeometrySink for Failing {
    fn commit(&mut self, _: usize, _: &[Vec3], _: &[Rgba8]) -> GlyphwaveResult<()> {
        Err(GlyphwaveError::sink("device lost"))
    }
}

#[test]
fn borrowed_sink_forwards() {
    fn push<S: GeometrySink>(mut sink: S) -> GlyphwaveResult<()> {
        sink.commit(0, &[], &[])
    }

    let mut inner = InMemorySink::new();
    push(&mut inner).unwrap();
    assert_eq!(inner.commit_count(), 1);

    let mut failing = Failing;
    let err = push(&mut failing).unwrap_err();
    assert!(err.to_string().contains("device lost"));
}
