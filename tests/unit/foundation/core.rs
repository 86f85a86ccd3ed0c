use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn fps_parses_ratios_and_integers() {
    assert_eq!(Fps::parse("30000/1001").unwrap(), Fps { num: 30000, den: 1001 });
    assert_eq!(Fps::parse(" 25 ").unwrap(), Fps { num: 25, den: 1 });
    assert!(Fps::parse("0/0").is_err());
    assert!(Fps::parse("abc").is_err());
}

#[test]
fn gaze_bounds_and_clamping() {
    let p = GazePoint::new(99, 0);
    assert!(p.is_within(100, 100));
    assert!(!GazePoint::new(100, 0).is_within(100, 100));
    assert!(!GazePoint::new(-1, 5).is_within(100, 100));

    assert_eq!(GazePoint::new(-7, 250).clamped(100, 80), GazePoint::new(0, 79));
    assert_eq!(GazePoint::new(12, 34).clamped(100, 80), GazePoint::new(12, 34));
}

#[test]
fn gaze_serializes_as_pair() {
    let p: GazePoint = serde_json::from_str("[3, 4]").unwrap();
    assert_eq!(p, GazePoint::new(3, 4));
    assert_eq!(serde_json::to_string(&p).unwrap(), "[3,4]");
}
