use super::*;

fn opts(focus: f32, aura: f32) -> OverlayOpts {
    OverlayOpts {
        focus_radius: focus,
        aura_radius: aura,
        blur_kernel: 1,
        ..OverlayOpts::default()
    }
}

#[test]
fn renders_ring_in_signal_color() {
    let r = OverlayRenderer::new(&opts(2.0, 4.0)).unwrap();
    let frame = Frame::solid(16, 16, [10, 20, 30]).unwrap();
    let out = r.render(&frame, GazePoint::new(8, 8), 1.0).unwrap();
    assert_eq!(out.pixel(8, 8).unwrap(), [10, 20, 30]);
    assert_eq!(out.pixel(11, 8).unwrap(), [255, 0, 0]);
    assert_eq!(out.pixel(13, 8).unwrap(), [10, 20, 30]);
}

#[test]
fn off_frame_gaze_is_clamped_by_default() {
    let r = OverlayRenderer::new(&opts(1.0, 2.0)).unwrap();
    let frame = Frame::solid(10, 10, [50, 50, 50]).unwrap();
    let clamped = r.render(&frame, GazePoint::new(-20, 4), -1.0).unwrap();
    let edge = r.render(&frame, GazePoint::new(0, 4), -1.0).unwrap();
    assert_eq!(clamped, edge);
}

#[test]
fn off_frame_gaze_can_be_rejected() {
    let r = OverlayRenderer::new(&OverlayOpts {
        gaze_policy: GazePolicy::Reject,
        ..opts(1.0, 2.0)
    })
    .unwrap();
    let frame = Frame::solid(10, 10, [0, 0, 0]).unwrap();
    assert!(matches!(
        r.render(&frame, GazePoint::new(10, 0), 0.0),
        Err(AuraError::DimensionMismatch { x: 10, y: 0, .. })
    ));
}

#[test]
fn out_of_range_signal_is_rejected_by_default() {
    let r = OverlayRenderer::new(&opts(1.0, 2.0)).unwrap();
    let frame = Frame::solid(4, 4, [0, 0, 0]).unwrap();
    assert!(matches!(
        r.render(&frame, GazePoint::new(1, 1), 1.01),
        Err(AuraError::SignalOutOfRange { .. })
    ));
}

#[test]
fn invalid_opts_do_not_build() {
    assert!(OverlayRenderer::new(&opts(5.0, 4.0)).is_err());
}
