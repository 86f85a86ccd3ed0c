use super::*;

#[test]
fn png_preview_writes_the_latest_sampled_frame() {
    let dir = std::env::temp_dir().join(format!("gaze_aura_preview_{}", std::process::id()));
    let path = dir.join("latest.png");
    let _ = std::fs::remove_file(&path);

    let mut preview = PngPreview::new(&path, 2);
    let red = Frame::solid(4, 3, [255, 0, 0]).unwrap();
    let blue = Frame::solid(4, 3, [0, 0, 255]).unwrap();

    assert_eq!(preview.show(FrameIndex(1), &red).unwrap(), PreviewAction::Continue);
    assert!(!path.exists());

    assert_eq!(preview.show(FrameIndex(2), &blue).unwrap(), PreviewAction::Continue);
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn stop_file_requests_a_pipeline_stop() {
    let dir = std::env::temp_dir().join(format!("gaze_aura_preview_stop_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let stop = dir.join("stop");
    let _ = std::fs::remove_file(&stop);

    let mut preview = PngPreview::new(dir.join("latest.png"), 10).with_stop_file(&stop);
    let frame = Frame::solid(2, 2, [1, 2, 3]).unwrap();
    assert_eq!(preview.show(FrameIndex(1), &frame).unwrap(), PreviewAction::Continue);

    std::fs::write(&stop, "").unwrap();
    assert_eq!(preview.show(FrameIndex(2), &frame).unwrap(), PreviewAction::Stop);

    let _ = std::fs::remove_dir_all(&dir);
}
