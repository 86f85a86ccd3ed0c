use super::*;

#[test]
fn kernel_1_is_identity() {
    let src = vec![1, 2, 3, 4, 5, 6];
    let out = BoxBlur::new(1).unwrap().apply(&src, 3, 2, 1).unwrap();
    assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn kernel_0_is_rejected() {
    assert!(BoxBlur::new(0).is_err());
}

#[test]
fn constant_image_is_identity() {
    let (w, h) = (7u32, 5u32);
    let src = [10, 200, 33].repeat((w * h) as usize);
    let out = BoxBlur::new(20).unwrap().apply(&src, w, h, 3).unwrap();
    for px in out.chunks_exact(3) {
        assert_eq!(px, &[10.0, 200.0, 33.0]);
    }
}

#[test]
fn even_kernel_window_is_offset_towards_origin() {
    // 1D row [0, 0, 0, 0, 9, 0, 0, 0]; kernel 2 covers offsets -1..=0.
    let src = vec![0, 0, 0, 0, 9, 0, 0, 0];
    let out = BoxBlur::new(2).unwrap().apply(&src, 8, 1, 1).unwrap();
    // A single row reflects onto itself, so the vertical window counts it twice (area 4).
    assert_eq!(out[4], 9.0 * 2.0 / 4.0);
    assert_eq!(out[5], 9.0 * 2.0 / 4.0);
    assert_eq!(out[3], 0.0);
    assert_eq!(out[6], 0.0);
}

#[test]
fn reflect101_does_not_repeat_edges() {
    assert_eq!(reflect101(-1, 4), 1);
    assert_eq!(reflect101(-3, 4), 3);
    assert_eq!(reflect101(4, 4), 2);
    assert_eq!(reflect101(9, 4), 3);
    assert_eq!(reflect101(-5, 1), 0);
}

#[test]
fn mass_is_preserved_away_from_borders() {
    let (w, h) = (30u32, 30u32);
    let mut src = vec![0i32; (w * h) as usize];
    src[(15 * w + 15) as usize] = 400;
    let out = BoxBlur::new(4).unwrap().apply(&src, w, h, 1).unwrap();
    let total: f32 = out.iter().sum();
    assert!((total - 400.0).abs() < 1e-3);
    assert_eq!(out.iter().filter(|&&v| v > 0.0).count(), 16);
}

#[test]
fn channels_are_blurred_independently() {
    let (w, h) = (6u32, 4u32);
    let mut interleaved = Vec::new();
    let mut planes = [Vec::new(), Vec::new(), Vec::new()];
    for i in 0..(w * h) as i32 {
        let px = [i * 3 % 17, 255 - i, (i * i) % 41];
        interleaved.extend_from_slice(&px);
        for c in 0..3 {
            planes[c].push(px[c]);
        }
    }
    let blur = BoxBlur::new(3).unwrap();
    let fused = blur.apply(&interleaved, w, h, 3).unwrap();
    for (c, plane) in planes.iter().enumerate() {
        let single = blur.apply(plane, w, h, 1).unwrap();
        let from_fused: Vec<f32> = fused.chunks_exact(3).map(|px| px[c]).collect();
        assert_eq!(single, from_fused);
    }
}

#[test]
fn rejects_mismatched_buffers() {
    let blur = BoxBlur::new(3).unwrap();
    assert!(blur.apply(&[0; 5], 2, 2, 1).is_err());
    assert!(blur.apply(&[], 0, 0, 0).is_err());
}
