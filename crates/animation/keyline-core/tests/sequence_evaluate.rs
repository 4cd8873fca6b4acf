use keyline_core::{
    interp::functions::{ease_in, ease_out},
    InterpolationMode, Keyframe, KeyframeSequence,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn mk_seq(keys: &[(u32, f64, InterpolationMode)]) -> KeyframeSequence {
    let mut seq = KeyframeSequence::new();
    for (frame, value, mode) in keys {
        seq.add(*frame, *value, *mode);
    }
    seq
}

const DEFAULT: f64 = -1.0;

#[test]
fn empty_sequence_returns_default() {
    let seq = KeyframeSequence::new();
    assert_eq!(seq.evaluate(0.0, DEFAULT), DEFAULT);
    assert_eq!(seq.evaluate(1234.5, 7.0), 7.0);
}

#[test]
fn authored_points_are_exact() {
    // Values chosen so that lerp math would drift if applied at the keys.
    let seq = mk_seq(&[
        (0, 0.1, InterpolationMode::EaseInOut),
        (7, 0.7, InterpolationMode::Bezier),
        (13, 1.0 / 3.0, InterpolationMode::EaseIn),
        (29, 0.3, InterpolationMode::Linear),
    ]);
    for kf in seq.iter() {
        assert_eq!(seq.evaluate(kf.frame as f64, DEFAULT), kf.value);
    }
}

#[test]
fn holds_outside_the_keyed_span() {
    let seq = mk_seq(&[
        (10, 2.0, InterpolationMode::Linear),
        (20, 4.0, InterpolationMode::Linear),
    ]);
    for f in [-100.0, 0.0, 9.0, 9.999] {
        assert_eq!(seq.evaluate(f, DEFAULT), 2.0);
    }
    for f in [20.001, 21.0, 1e9] {
        assert_eq!(seq.evaluate(f, DEFAULT), 4.0);
    }
}

#[test]
fn single_keyframe_holds_everywhere() {
    let seq = mk_seq(&[(5, 3.5, InterpolationMode::EaseIn)]);
    assert_eq!(seq.evaluate(-3.0, DEFAULT), 3.5);
    assert_eq!(seq.evaluate(5.0, DEFAULT), 3.5);
    assert_eq!(seq.evaluate(500.0, DEFAULT), 3.5);
}

#[test]
fn overwrite_replaces_without_growing() {
    let mut seq = mk_seq(&[
        (0, 0.0, InterpolationMode::Linear),
        (10, 1.0, InterpolationMode::Linear),
    ]);
    let before = seq.len();
    seq.add(10, 5.0, InterpolationMode::Step);
    assert_eq!(seq.len(), before);
    let kf = seq.get(10).unwrap();
    assert_eq!(kf.value, 5.0);
    assert_eq!(kf.interpolation, InterpolationMode::Step);
}

#[test]
fn remove_absent_frame_is_noop() {
    let mut seq = mk_seq(&[(0, 0.0, InterpolationMode::Linear)]);
    assert!(seq.remove(3).is_none());
    assert_eq!(seq.len(), 1);
    assert_eq!(
        seq.remove(0),
        Some(Keyframe::new(0, 0.0, InterpolationMode::Linear))
    );
    assert!(seq.is_empty());
}

#[test]
fn step_holds_left_value_inside_segment() {
    let seq = mk_seq(&[
        (0, 10.0, InterpolationMode::Step),
        (10, 20.0, InterpolationMode::Linear),
    ]);
    for f in [0.001, 1.0, 5.0, 9.0, 9.999] {
        assert_eq!(seq.evaluate(f, DEFAULT), 10.0);
    }
    assert_eq!(seq.evaluate(10.0, DEFAULT), 20.0);
}

#[test]
fn linear_midpoint_is_mean() {
    let seq = mk_seq(&[
        (4, -3.0, InterpolationMode::Linear),
        (16, 9.0, InterpolationMode::Linear),
    ]);
    approx(seq.evaluate(4.0 + 0.5 * 12.0, DEFAULT), 3.0, 1e-12);
    approx(seq.evaluate(7.0, DEFAULT), 0.0, 1e-12);
}

#[test]
fn mode_of_left_keyframe_governs_segment() {
    // Segment [0,10] is EaseIn (from k0); segment [10,20] is EaseOut (from k1).
    let seq = mk_seq(&[
        (0, 0.0, InterpolationMode::EaseIn),
        (10, 1.0, InterpolationMode::EaseOut),
        (20, 0.0, InterpolationMode::Linear),
    ]);
    approx(seq.evaluate(5.0, DEFAULT), 0.25, 1e-12);
    // EaseOut at t=0.5 -> 0.75 of the way from 1.0 to 0.0
    approx(seq.evaluate(15.0, DEFAULT), 0.25, 1e-12);
}

#[test]
fn easing_curves_at_quarter() {
    let cases = [
        (InterpolationMode::Linear, 0.25),
        (InterpolationMode::EaseIn, 0.0625),
        (InterpolationMode::EaseOut, 0.4375),
        (InterpolationMode::EaseInOut, 0.125),
        (InterpolationMode::Bezier, 0.15625),
    ];
    for (mode, expected) in cases {
        let seq = mk_seq(&[(0, 0.0, mode), (4, 1.0, InterpolationMode::Linear)]);
        approx(seq.evaluate(1.0, DEFAULT), expected, 1e-12);
    }
}

#[test]
fn ease_in_out_upper_half() {
    let seq = mk_seq(&[
        (0, 0.0, InterpolationMode::EaseInOut),
        (4, 1.0, InterpolationMode::Linear),
    ]);
    // t = 0.75 -> 1 - 2 * 0.25^2 = 0.875
    approx(seq.evaluate(3.0, DEFAULT), 0.875, 1e-12);
}

#[test]
fn ease_in_is_mirrored_ease_out() {
    let seq_in = mk_seq(&[
        (0, 0.0, InterpolationMode::EaseIn),
        (100, 1.0, InterpolationMode::Linear),
    ]);
    let seq_out = mk_seq(&[
        (0, 0.0, InterpolationMode::EaseOut),
        (100, 1.0, InterpolationMode::Linear),
    ]);
    for i in 1..100 {
        let f = i as f64;
        approx(
            seq_in.evaluate(f, DEFAULT),
            1.0 - seq_out.evaluate(100.0 - f, DEFAULT),
            1e-12,
        );
        let t = f / 100.0;
        approx(ease_in(t), 1.0 - ease_out(1.0 - t), 1e-12);
    }
}

#[test]
fn opacity_scenario() {
    let seq = mk_seq(&[
        (0, 0.0, InterpolationMode::Linear),
        (30, 100.0, InterpolationMode::EaseOut),
    ]);
    assert_eq!(seq.evaluate(0.0, 100.0), 0.0);
    assert_eq!(seq.evaluate(30.0, 100.0), 100.0);
    approx(seq.evaluate(15.0, 100.0), 50.0, 1e-9);
    assert_eq!(seq.evaluate(-5.0, 100.0), 0.0);
    assert_eq!(seq.evaluate(1000.0, 100.0), 100.0);
}

#[test]
fn sub_frame_sampling_is_monotonic_for_rising_curves() {
    let seq = mk_seq(&[
        (0, 0.0, InterpolationMode::Bezier),
        (10, 1.0, InterpolationMode::Linear),
    ]);
    let mut last = f64::NEG_INFINITY;
    for i in 0..=100 {
        let v = seq.evaluate(i as f64 * 0.1, DEFAULT);
        assert!(v >= last, "curve decreased at sample {i}");
        last = v;
    }
}
