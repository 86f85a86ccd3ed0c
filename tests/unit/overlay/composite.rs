use super::*;
use crate::foundation::core::GazePoint;
use crate::overlay::field::build_field;
use crate::overlay::masks::build_masks;

fn gradient_frame(w: u32, h: u32) -> Frame {
    let mut data = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) * 3) as u8]);
        }
    }
    Frame::from_rgb8(w, h, data).unwrap()
}

fn masks_for(w: u32, h: u32, p: GazePoint, focus: f32, aura: f32) -> RegionMasks {
    build_masks(&build_field(w, h, p).unwrap(), focus, aura).unwrap()
}

#[test]
fn unblurred_regions_are_exact() {
    let frame = gradient_frame(24, 18);
    let masks = masks_for(24, 18, GazePoint::new(12, 9), 3.0, 6.0);
    let color = OverlayColor { r: 200, g: 10, b: 90 };
    let out = compose(&frame, &masks, color, &BoxBlur::new(1).unwrap()).unwrap();

    // focus disk keeps the source pixel
    assert_eq!(out.pixel(12, 9).unwrap(), frame.pixel(12, 9).unwrap());
    assert_eq!(out.pixel(15, 9).unwrap(), frame.pixel(15, 9).unwrap());
    // ring takes the aura color
    assert_eq!(out.pixel(17, 9).unwrap(), [200, 10, 90]);
    assert_eq!(out.pixel(18, 9).unwrap(), [200, 10, 90]);
    // background keeps the source pixel
    assert_eq!(out.pixel(19, 9).unwrap(), frame.pixel(19, 9).unwrap());
    assert_eq!(out.pixel(0, 0).unwrap(), frame.pixel(0, 0).unwrap());
}

#[test]
fn focus_disk_stays_sharp_under_blur() {
    let frame = gradient_frame(40, 30);
    let masks = masks_for(40, 30, GazePoint::new(20, 15), 5.0, 8.0);
    let out = compose(
        &frame,
        &masks,
        OverlayColor { r: 0, g: 51, b: 0 },
        &BoxBlur::new(20).unwrap(),
    )
    .unwrap();
    for y in 0..30 {
        for x in 0..40 {
            if masks.in_focus[(y * 40 + x) as usize] == 1 {
                assert_eq!(out.pixel(x, y).unwrap(), frame.pixel(x, y).unwrap());
            }
        }
    }
}

#[test]
fn fused_matches_per_channel() {
    let (w, h) = (33u32, 21u32);
    let frame = gradient_frame(w, h);
    let masks = masks_for(w, h, GazePoint::new(5, 17), 4.0, 9.0);
    let color = OverlayColor { r: 127, g: 25, b: 0 };
    let blur = BoxBlur::new(20).unwrap();

    let fused = compose(&frame, &masks, color, &blur).unwrap();

    let planes: Vec<Vec<u8>> = (0..3)
        .map(|c| {
            compose_channel(
                &frame.channel_plane(c),
                w,
                h,
                &masks,
                color.channel(c),
                &blur,
            )
            .unwrap()
        })
        .collect();
    let reassembled = Frame::from_planes(w, h, [&planes[0], &planes[1], &planes[2]]).unwrap();
    assert_eq!(fused, reassembled);
}

#[test]
fn out_of_range_colors_saturate() {
    let frame = Frame::solid(8, 8, [100, 100, 100]).unwrap();
    let masks = masks_for(8, 8, GazePoint::new(4, 4), -1.0, 100.0);
    let out = compose(
        &frame,
        &masks,
        OverlayColor { r: 510, g: -51, b: 0 },
        &BoxBlur::new(1).unwrap(),
    )
    .unwrap();
    for px in out.data.chunks_exact(3) {
        assert_eq!(px, &[255, 0, 0]);
    }
}

#[test]
fn mask_size_mismatch_is_rejected() {
    let frame = gradient_frame(10, 10);
    let masks = masks_for(9, 10, GazePoint::new(0, 0), 1.0, 2.0);
    let err = compose(
        &frame,
        &masks,
        OverlayColor { r: 0, g: 0, b: 0 },
        &BoxBlur::new(3).unwrap(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("mask size mismatch"));
}
