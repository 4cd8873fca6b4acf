use keyline_core::{frame_to_timecode, EngineError, StandardRate, Timecode, TimelineDocument};

#[test]
fn whole_second_boundaries() {
    assert_eq!(frame_to_timecode(90, 30.0).unwrap().to_string(), "00:00:03:00");
    assert_eq!(
        frame_to_timecode(108_000, 30.0).unwrap().to_string(),
        "01:00:00:00"
    );
    assert_eq!(frame_to_timecode(0, 24.0).unwrap(), Timecode::default());
    assert_eq!(frame_to_timecode(23, 24.0).unwrap().frames, 23);
}

#[test]
fn invalid_rate_is_rejected() {
    for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            frame_to_timecode(10, fps),
            Err(EngineError::InvalidFrameRate { .. })
        ));
    }
}

#[test]
fn parse_accepts_well_formed_text() {
    let tc = Timecode::parse("01:02:03:04", 25.0).unwrap();
    assert_eq!(tc, Timecode::new(1, 2, 3, 4));
    let short = Timecode::parse("1:00:00:00", 25.0).unwrap();
    assert_eq!(short.hours, 1);
}

#[test]
fn parse_rejects_out_of_range_fields() {
    for (text, fps) in [
        ("24:00:00:00", 30.0),
        ("00:60:00:00", 30.0),
        ("00:00:60:00", 30.0),
        ("00:00:00:25", 25.0),
        ("00:00:00:30", 29.97),
    ] {
        let err = Timecode::parse(text, fps).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidTimecode { .. }),
            "{text} @ {fps}: {err}"
        );
        assert_eq!(err.category(), "timecode");
    }
}

#[test]
fn parse_rejects_bad_shapes() {
    for text in ["", "00:00:00", "00:00:00:00:00", "aa:00:00:00", "00:0:00:00", "000:00:00:00"] {
        assert!(Timecode::parse(text, 30.0).is_err(), "accepted '{text}'");
    }
}

#[test]
fn parse_and_decompose_agree_for_integer_rates() {
    for fps in [24.0, 25.0, 30.0, 60.0] {
        for frame in [0u64, 1, 59, 1_000, 86_399] {
            let tc = frame_to_timecode(frame, fps).unwrap();
            let back = Timecode::parse(&tc.to_string(), fps).unwrap();
            assert_eq!(back.to_frame(fps), frame, "{frame} @ {fps}");
        }
    }
}

#[test]
fn standard_rates_table() {
    assert_eq!(StandardRate::all().len(), 8);
    let drop: Vec<f64> = StandardRate::all()
        .iter()
        .filter(|r| r.is_drop_frame())
        .map(|r| r.fps())
        .collect();
    assert_eq!(drop, vec![29.97, 59.94]);
    assert_eq!(StandardRate::from_fps(25.0).unwrap(), StandardRate::Pal25);
    assert!(matches!(
        StandardRate::from_fps(12.0),
        Err(EngineError::UnsupportedFrameRate { .. })
    ));
}

#[test]
fn document_playhead_timecode() {
    let mut doc = TimelineDocument::new();
    doc.set_frame_rate(30.0).unwrap();
    doc.set_duration(300).unwrap();
    doc.set_current_frame(90);
    assert_eq!(doc.current_timecode().to_string(), "00:00:03:00");
    // Clamped to the last frame.
    doc.set_current_frame(10_000);
    assert_eq!(doc.current_frame(), 299);
    assert_eq!(doc.step_frames(-300), 0);
}
