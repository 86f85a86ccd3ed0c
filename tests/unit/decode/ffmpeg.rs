use super::*;

struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn read_full_collects_short_reads() {
    let data: Vec<u8> = (0..10).collect();
    let mut r = Trickle {
        data: &data,
        step: 3,
    };
    let mut buf = [0u8; 8];
    assert_eq!(read_full(&mut r, &mut buf).unwrap(), 8);
    assert_eq!(buf, [0, 1, 2, 3, 4, 5, 6, 7]);

    let mut rest = [0u8; 8];
    assert_eq!(read_full(&mut r, &mut rest).unwrap(), 2);
    assert_eq!(read_full(&mut r, &mut rest).unwrap(), 0);
}

#[test]
fn missing_file_fails_to_open() {
    let err = FfmpegSource::open(Path::new("definitely/not/here.mp4"))
        .err()
        .expect("opening a missing file must fail");
    assert!(matches!(err, AuraError::SourceRead(_)));
}
