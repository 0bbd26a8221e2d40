use super::*;
use crate::{
    animation::channel::{Channel, Timing},
    foundation::{
        core::{Rgba8, Vec3},
        error::GlyphwaveError,
    },
    layout::fixed::{FixedLayout, FixedLayoutOpts},
    output::sink::InMemorySink,
};

type Animator = GeometryAnimator<FixedLayout, InMemorySink>;

fn fade_in() -> AnimationDescriptor {
    AnimationDescriptor {
        channels: vec![Channel::alpha(Timing::new(0.0, 0.1, 0.2), 0.0, 1.0)],
        ..AnimationDescriptor::default()
    }
}

fn animator(text: &str, descriptor: AnimationDescriptor, opts: AnimatorOpts) -> Animator {
    let layout = FixedLayout::new(text, FixedLayoutOpts::default());
    GeometryAnimator::attach(layout, InMemorySink::new(), descriptor, opts).unwrap()
}

fn alphas(a: &Animator) -> Vec<u8> {
    let c = a.sink().latest(0).unwrap();
    a.layout()
        .glyphs()
        .iter()
        .filter(|g| g.is_visible)
        .map(|g| c.colors[g.vertex_offset].a)
        .collect()
}

#[test]
fn no_descriptor_skips_everything() {
    let layout = FixedLayout::new("abc", FixedLayoutOpts::default());
    let mut a = GeometryAnimator::new(layout, InMemorySink::new(), AnimatorOpts::default());
    let skipped = FrameOutcome::Skipped(SkipReason::NoDescriptor);
    assert_eq!(a.play().unwrap(), skipped);
    assert_eq!(a.tick(0.1).unwrap(), skipped);
    assert_eq!(a.finish(0.0).unwrap(), skipped);
    assert_eq!(a.state(), PlaybackState::Idle);
    assert_eq!(a.sink().commit_count(), 0);
}

#[test]
fn attach_evaluates_clock_zero_without_playing() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    assert_eq!(a.state(), PlaybackState::Idle);
    assert_eq!(a.sink().commit_count(), 1);
    assert_eq!(alphas(&a), vec![0, 0, 0]);
    assert_eq!(
        a.tick(0.1).unwrap(),
        FrameOutcome::Skipped(SkipReason::Inactive)
    );
}

#[test]
fn play_on_attach_starts_playing() {
    let a = animator(
        "abc",
        fade_in(),
        AnimatorOpts {
            play_on_attach: true,
            ..AnimatorOpts::default()
        },
    );
    assert!(a.is_animating());
    assert_eq!(a.clock(), 0.0);
    assert_eq!(a.sink().commit_count(), 1);
}

#[test]
fn plays_to_the_end_then_finishes() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.play().unwrap();
    assert!((a.max_duration() - 0.4).abs() < 1e-6);

    a.tick(0.25).unwrap();
    assert_eq!(a.state(), PlaybackState::Playing);
    assert!((a.clock() - 0.25).abs() < 1e-6);

    a.tick(0.25).unwrap();
    assert_eq!(a.state(), PlaybackState::Finished);
    assert_eq!(a.clock(), a.max_duration());
    assert_eq!(alphas(&a), vec![255, 255, 255]);
    assert_eq!(
        a.tick(0.25).unwrap(),
        FrameOutcome::Skipped(SkipReason::Inactive)
    );
}

#[test]
fn restart_policy_rewinds() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.play().unwrap();
    a.tick(0.1).unwrap();
    assert!(a.play().unwrap().is_committed());
    assert_eq!(a.clock(), 0.0);
    assert!(a.is_animating());
}

#[test]
fn ignore_policy_keeps_playing() {
    let opts = AnimatorOpts {
        replay: ReplayPolicy::IgnoreWhilePlaying,
        ..AnimatorOpts::default()
    };
    let mut a = animator("abc", fade_in(), opts);
    a.play().unwrap();
    a.tick(0.125).unwrap();
    let commits = a.sink().commit_count();
    assert_eq!(
        a.play().unwrap(),
        FrameOutcome::Skipped(SkipReason::AlreadyPlaying)
    );
    assert_eq!(a.clock(), 0.125);
    assert_eq!(a.sink().commit_count(), commits);

    a.finish(0.0).unwrap();
    assert!(a.play().unwrap().is_committed());
}

#[test]
fn looping_wraps_without_drift() {
    let descriptor = AnimationDescriptor {
        looping: true,
        channels: vec![Channel::position(
            Timing::new(0.25, 0.0, 0.25),
            Vec3::ZERO,
            Vec3::Y,
        )],
        ..AnimationDescriptor::default()
    };
    let mut a = animator("abc", descriptor, AnimatorOpts::default());
    a.play().unwrap();
    assert_eq!(a.max_duration(), 0.5);

    a.tick(0.125).unwrap();
    let before = a.clock();
    for _ in 0..8 {
        a.tick(0.125).unwrap();
    }
    assert_eq!(a.clock(), before);
    assert!(a.is_animating());
}

#[test]
fn negative_speed_plays_backwards_from_the_end() {
    let descriptor = AnimationDescriptor {
        playback_speed: -1.0,
        ..fade_in()
    };
    let mut a = animator("abc", descriptor, AnimatorOpts::default());
    a.play().unwrap();
    assert_eq!(a.clock(), a.max_duration());
    assert_eq!(alphas(&a), vec![255, 255, 255]);

    a.tick(0.25).unwrap();
    assert!(a.is_animating());
    a.tick(0.25).unwrap();
    assert_eq!(a.state(), PlaybackState::Finished);
    assert_eq!(a.clock(), 0.0);
    assert_eq!(alphas(&a), vec![0, 0, 0]);
}

#[test]
fn looping_backwards_wraps_through_zero() {
    let descriptor = AnimationDescriptor {
        looping: true,
        playback_speed: -1.0,
        channels: vec![Channel::position(
            Timing::new(0.25, 0.0, 0.25),
            Vec3::ZERO,
            Vec3::Y,
        )],
        ..AnimationDescriptor::default()
    };
    let mut a = animator("abc", descriptor, AnimatorOpts::default());
    a.play().unwrap();
    assert_eq!(a.clock(), 0.5);

    for _ in 0..4 {
        a.tick(0.125).unwrap();
    }
    assert_eq!(a.clock(), 0.0);
    assert!(a.is_animating());

    a.tick(0.125).unwrap();
    assert_eq!(a.clock(), 0.375);
    assert_eq!(a.state(), PlaybackState::Playing);
}

#[test]
fn not_ready_layout_is_retried_next_tick() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.layout_mut().set_ready(false);
    assert_eq!(
        a.play().unwrap(),
        FrameOutcome::Skipped(SkipReason::LayoutNotReady)
    );
    assert!(a.is_animating());

    a.layout_mut().set_ready(true);
    assert_eq!(
        a.tick(0.1).unwrap(),
        FrameOutcome::Committed { batches: 1 }
    );
}

#[test]
fn empty_text_is_not_ready() {
    let mut a = animator("", fade_in(), AnimatorOpts::default());
    assert_eq!(
        a.play().unwrap(),
        FrameOutcome::Skipped(SkipReason::LayoutNotReady)
    );
    // zero-length timeline finishes on the first tick
    a.tick(0.1).unwrap();
    assert_eq!(a.state(), PlaybackState::Finished);
}

#[test]
fn scrubbing_follows_progress() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    assert!(a.set_progress(0.5).unwrap().is_committed());
    assert!(a.is_scrubbing());
    assert!((a.clock() - 0.2).abs() < 1e-6);
    assert!((a.progress() - 0.5).abs() < 1e-6);

    assert!(a.tick(1.0).unwrap().is_committed());
    assert!((a.clock() - 0.2).abs() < 1e-6);

    a.set_progress(7.0).unwrap();
    assert_eq!(a.clock(), a.max_duration());

    a.stop_scrubbing();
    assert_eq!(
        a.tick(1.0).unwrap(),
        FrameOutcome::Skipped(SkipReason::Inactive)
    );
}

#[test]
fn finish_jumps_to_normalized_time() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.play().unwrap();
    a.finish(1.0).unwrap();
    assert_eq!(a.state(), PlaybackState::Finished);
    assert_eq!(alphas(&a), vec![255, 255, 255]);

    a.finish(0.0).unwrap();
    assert_eq!(a.clock(), 0.0);
    assert_eq!(alphas(&a), vec![0, 0, 0]);
}

#[test]
fn reveal_throttles_visible_cap_to_alpha_wave() {
    let descriptor = AnimationDescriptor {
        reveal_by_visible_character_count: true,
        ..fade_in()
    };
    let mut a = animator("abcd", descriptor, AnimatorOpts::default());
    a.play().unwrap();
    assert_eq!(a.layout().visible_character_cap(), Some(1));

    a.tick(0.15).unwrap();
    assert_eq!(a.layout().visible_character_cap(), Some(2));
    let visible = a.layout().glyphs().iter().filter(|g| g.is_visible).count();
    assert_eq!(visible, 2);

    a.set_descriptor(fade_in()).unwrap();
    assert_eq!(a.layout().visible_character_cap(), None);
}

#[test]
fn commits_every_batch_once_per_call() {
    let layout = FixedLayout::new(
        "abcd",
        FixedLayoutOpts {
            batch_count: 2,
            ..FixedLayoutOpts::default()
        },
    );
    let mut a =
        GeometryAnimator::attach(layout, InMemorySink::new(), fade_in(), AnimatorOpts::default())
            .unwrap();
    assert_eq!(a.sink().commit_count(), 2);
    assert_eq!(a.play().unwrap(), FrameOutcome::Committed { batches: 2 });
    assert_eq!(a.sink().commit_count(), 4);
    a.tick(0.1).unwrap();
    assert_eq!(a.sink().commit_count(), 6);
}

#[test]
fn layout_change_rederives_duration_and_keeps_state() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.play().unwrap();
    a.tick(0.125).unwrap();

    a.layout_mut().set_text("abcdef");
    a.notify_layout_changed().unwrap();
    assert!((a.max_duration() - 0.7).abs() < 1e-6);
    assert!(a.is_animating());
    assert_eq!(a.clock(), 0.125);
    assert_eq!(alphas(&a).len(), 6);
}

#[test]
fn shrinking_text_pulls_the_clock_back_into_range() {
    let mut a = animator("abcdef", fade_in(), AnimatorOpts::default());
    a.finish(1.0).unwrap();
    assert!((a.clock() - 0.7).abs() < 1e-6);

    a.layout_mut().set_text("abc");
    a.notify_layout_changed().unwrap();
    assert!((a.max_duration() - 0.4).abs() < 1e-6);
    assert_eq!(a.clock(), a.max_duration());
    assert_eq!(alphas(&a), vec![255, 255, 255]);
}

#[test]
fn shrinking_text_wraps_a_looping_clock() {
    let descriptor = AnimationDescriptor {
        looping: true,
        ..fade_in()
    };
    let mut a = animator("abcdef", descriptor, AnimatorOpts::default());
    a.play().unwrap();
    for _ in 0..5 {
        a.tick(0.125).unwrap();
    }
    assert_eq!(a.clock(), 0.625);

    a.layout_mut().set_text("abc");
    a.notify_layout_changed().unwrap();
    assert!(a.clock() >= 0.0 && a.clock() < a.max_duration());
    assert!((a.clock() - 0.225).abs() < 1e-5);
    assert!(a.is_animating());
}

#[test]
fn noise_clock_advances_and_resets_on_play() {
    let mut a = animator("abc", fade_in(), AnimatorOpts::default());
    a.tick(0.5).unwrap();
    assert_eq!(a.noise_time(), 0.5);
    a.play().unwrap();
    assert_eq!(a.noise_time(), 0.0);
}

#[derive(Debug)]
struct Failing;

impl GeometrySink for Failing {
    fn commit(
        &mut self,
        _: usize,
        _: &[Vec3],
        _: &[Rgba8],
    ) -> GlyphwaveResult<()> {
        Err(GlyphwaveError::sink("upload failed"))
    }
}

#[test]
fn sink_errors_propagate() {
    let layout = FixedLayout::new("abc", FixedLayoutOpts::default());
    let mut a = GeometryAnimator::new(layout, Failing, AnimatorOpts::default());
    let err = a.set_descriptor(fade_in()).unwrap_err();
    assert!(matches!(err, GlyphwaveError::Sink(_)));
}
