use super::*;

#[test]
fn whitespace_is_invisible_and_counted() {
    let l = FixedLayout::new("a b", FixedLayoutOpts::default());
    assert_eq!(l.character_count(), 3);
    let vis: Vec<bool> = l.glyphs().iter().map(|g| g.is_visible).collect();
    assert_eq!(vis, vec![true, false, true]);
    let b = l.batch(0).unwrap();
    assert_eq!(b.vertices.len(), 8);
    assert_eq!(b.colors.len(), 8);
    assert_eq!(l.glyphs()[2].vertex_offset, 4);
}

#[test]
fn quads_follow_pen_and_corner_order() {
    let l = FixedLayout::new("ab\nc", FixedLayoutOpts::default());
    let b = l.batch(0).unwrap();
    let second = Quad::read(b.vertices, l.glyphs()[1].vertex_offset).unwrap();
    assert_eq!(second.0[0], Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(second.0[2], Vec3::new(18.0, 16.0, 0.0));
    let third = Quad::read(b.vertices, l.glyphs()[3].vertex_offset).unwrap();
    assert_eq!(third.0[0], Vec3::new(0.0, -20.0, 0.0));
}

#[test]
fn round_robin_batches() {
    let l = FixedLayout::new(
        "abc",
        FixedLayoutOpts {
            batch_count: 2,
            ..FixedLayoutOpts::default()
        },
    );
    let batches: Vec<usize> = l.glyphs().iter().map(|g| g.batch_index).collect();
    assert_eq!(batches, vec![0, 1, 0]);
    assert_eq!(l.batch(0).unwrap().vertices.len(), 8);
    assert_eq!(l.batch(1).unwrap().vertices.len(), 4);
    assert!(l.batch(2).is_none());
}

#[test]
fn cap_hides_and_regenerates() {
    let mut l = FixedLayout::new("abc", FixedLayoutOpts::default());
    let before = l.batch(0).unwrap().token;
    l.set_visible_character_cap(Some(1));
    assert_eq!(l.visible_character_cap(), Some(1));
    let after = l.batch(0).unwrap().token;
    assert_ne!(before, after);
    let vis: Vec<bool> = l.glyphs().iter().map(|g| g.is_visible).collect();
    assert_eq!(vis, vec![true, false, false]);
    assert_eq!(l.batch(0).unwrap().colors[4].a, 0);

    // Same cap again is not a regeneration.
    l.set_visible_character_cap(Some(1));
    assert_eq!(l.batch(0).unwrap().token, after);
}

#[test]
fn not_ready_hides_batches() {
    let mut l = FixedLayout::new("abc", FixedLayoutOpts::default());
    l.set_ready(false);
    assert!(l.batch(0).is_none());
    l.set_ready(true);
    assert!(l.batch(0).is_some());
}

#[test]
fn set_text_bumps_generation() {
    let mut l = FixedLayout::new("abc", FixedLayoutOpts::default());
    let g = l.generation();
    l.set_text("abcd");
    assert_eq!(l.generation(), g + 1);
    assert_eq!(l.character_count(), 4);
    assert_eq!(l.text(), "abcd");
}
