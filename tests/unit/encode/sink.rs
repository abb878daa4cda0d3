use super::*;

fn tiny_frame(rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: rgba.repeat(4),
        premultiplied: true,
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_sink").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn file_names_are_one_based_and_padded() {
    assert_eq!(PngSequenceSink::file_name(FrameIndex(0)), "0001.png");
    assert_eq!(PngSequenceSink::file_name(FrameIndex(41)), "0042.png");
    assert_eq!(PngSequenceSink::file_name(FrameIndex(9998)), "9999.png");
}

#[test]
fn png_sink_creates_dir_and_writes_frames() {
    let dir = scratch_dir("writes").join("nested");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        frames: 2,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &tiny_frame([10, 20, 30, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &tiny_frame([64, 0, 0, 128]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let first = image::open(dir.join("0001.png")).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (2, 2));
    assert_eq!(first.get_pixel(0, 0).0, [10, 20, 30, 255]);

    let second = image::open(dir.join("0002.png")).unwrap().to_rgba8();
    assert_eq!(second.get_pixel(1, 1).0, [128, 0, 0, 128]);

    assert!(!dir.join("0001.png.partial").exists());
}

#[test]
fn unwritable_dir_is_io_error() {
    let dir = scratch_dir("blocked");
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    std::fs::write(&dir, b"a file, not a dir").unwrap();

    let mut sink = PngSequenceSink::new(dir.join("out"));
    let err = sink
        .begin(SinkConfig {
            width: 1,
            height: 1,
            frames: 1,
        })
        .unwrap_err();
    assert!(matches!(err, LollipopError::Io(_)));
    let _ = std::fs::remove_file(&dir);
}

#[test]
fn in_memory_sink_records_in_order() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        frames: 2,
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(FrameIndex(0), &tiny_frame([1, 1, 1, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &tiny_frame([2, 2, 2, 255]))
        .unwrap();
    assert!(!sink.finished());
    sink.end().unwrap();

    assert!(sink.finished());
    assert_eq!(sink.config(), Some(cfg));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
}
