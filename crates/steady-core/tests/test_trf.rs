use std::io::Cursor;
use std::path::Path;

use approx::assert_abs_diff_eq;

use steady_core::error::StabilizeError;
use steady_core::io::trf::{
    default_result_path, format_record, load_transforms, parse_record, read_transforms,
    save_transforms, write_transforms, StreamHeader,
};
use steady_core::pipeline::config::{Algorithm, DetectOptions};
use steady_core::stream::TransformStream;
use steady_core::transform::Transform;

fn sample_stream() -> TransformStream {
    vec![
        Transform::identity(),
        Transform::translation(1.23456, -7.5),
        Transform {
            dx: -0.00004,
            dy: 12.0,
            alpha: 0.012345678,
            zoom: 0.0,
            extra: 0,
        },
        Transform::rejected(),
    ]
    .into_iter()
    .collect()
}

fn sample_header() -> StreamHeader {
    StreamHeader {
        accuracy: 9,
        shakiness: 7,
        step_size: 3,
        algorithm: Algorithm::GlobalBruteForce,
        min_contrast: 0.25,
        result: None,
    }
}

fn write_to_string(header: &StreamHeader, stream: &TransformStream) -> String {
    let mut buf = Vec::new();
    write_transforms(&mut buf, header, stream).unwrap();
    String::from_utf8(buf).unwrap()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

#[test]
fn test_record_format() {
    assert_eq!(
        format_record(0, &Transform::identity()),
        "0 0.0000 0.0000  0.00000 0.0000 0"
    );
    assert_eq!(
        format_record(12, &Transform::translation(-3.0, 14.25)),
        "12 -3.0000 14.2500  0.00000 0.0000 0"
    );
    assert_eq!(
        format_record(3, &Transform::rejected()),
        "3 0.0000 0.0000  0.00000 0.0000 -1"
    );
}

#[test]
fn test_header_block() {
    let text = write_to_string(&sample_header(), &TransformStream::new());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "#      accuracy = 9",
            "#     shakiness = 7",
            "#      stepsize = 3",
            "#          algo = 0",
            "#   mincontrast = 0.250000",
            "# Transforms",
            "#C FrameNr x y alpha zoom extra",
        ]
    );
}

#[test]
fn test_header_records_result_path() {
    let header = StreamHeader {
        result: Some("/videos/clip.trf".into()),
        ..sample_header()
    };
    let text = write_to_string(&header, &sample_stream());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[4], "#   mincontrast = 0.250000");
    assert_eq!(lines[5], "#        result = /videos/clip.trf");
    assert_eq!(lines[6], "# Transforms");

    let (parsed, stream) = read_transforms(Cursor::new(text)).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(stream.len(), 4);
}

#[test]
fn test_header_from_options_carries_result() {
    let options = DetectOptions {
        result: Some("out.trf".into()),
        ..Default::default()
    };
    let header = StreamHeader::from(&options);
    assert_eq!(header.result.as_deref(), Some(Path::new("out.trf")));
    assert_eq!(StreamHeader::default().result, None);
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[test]
fn test_roundtrip_within_precision() {
    let stream = sample_stream();
    let text = write_to_string(&sample_header(), &stream);
    let (header, parsed) = read_transforms(Cursor::new(text)).unwrap();

    assert_eq!(header, sample_header());
    assert_eq!(parsed.len(), stream.len());
    for ((_, a), (_, b)) in stream.iter().zip(parsed.iter()) {
        assert_abs_diff_eq!(a.dx, b.dx, epsilon = 5e-5);
        assert_abs_diff_eq!(a.dy, b.dy, epsilon = 5e-5);
        assert_abs_diff_eq!(a.alpha, b.alpha, epsilon = 5e-6);
        assert_abs_diff_eq!(a.zoom, b.zoom, epsilon = 5e-5);
        assert_eq!(a.extra, b.extra);
    }
    assert!(parsed.get(3).unwrap().is_rejected());
}

#[test]
fn test_missing_header_uses_defaults() {
    let (header, stream) = read_transforms(Cursor::new("0 1 2 0 0 0\n\n1 3 4 0.1 0 0\n")).unwrap();
    assert_eq!(header, StreamHeader::default());
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.last().unwrap().alpha, 0.1);
}

#[test]
fn test_unknown_comments_are_ignored() {
    let text = "# produced by a test\n#   unknown = 4\n0 0 0 0 0 0\n";
    let (_, stream) = read_transforms(Cursor::new(text)).unwrap();
    assert_eq!(stream.len(), 1);
}

#[test]
fn test_gap_in_frame_numbers() {
    let text = "# Transforms\n0 0 0 0 0 0\n2 0 0 0 0 0\n";
    let err = read_transforms(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, StabilizeError::TransformParse { line: 3, .. }));
}

#[test]
fn test_malformed_records() {
    assert!(matches!(
        parse_record("0 1.0 abc 0 0 0", 5),
        Err(StabilizeError::TransformParse { line: 5, .. })
    ));
    assert!(matches!(
        parse_record("0 1.0 2.0 0", 1),
        Err(StabilizeError::TransformParse { line: 1, .. })
    ));
    assert!(matches!(
        parse_record("-1 0 0 0 0 0", 1),
        Err(StabilizeError::TransformParse { .. })
    ));
}

#[test]
fn test_bad_header_value() {
    let err = read_transforms(Cursor::new("#          algo = 7\n")).unwrap_err();
    assert!(matches!(err, StabilizeError::TransformParse { line: 1, .. }));
}

#[test]
fn test_parse_record_values() {
    let (frame, t) = parse_record("4 -1.5000 2.2500 -0.01000 0.0000 0", 1).unwrap();
    assert_eq!(frame, 4);
    assert_eq!(t.dx, -1.5);
    assert_eq!(t.dy, 2.25);
    assert_eq!(t.alpha, -0.01);
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.trf");
    save_transforms(&path, &sample_header(), &sample_stream()).unwrap();

    let (header, stream) = load_transforms(&path).unwrap();
    assert_eq!(header, sample_header());
    assert_eq!(stream.len(), 4);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_transforms(&dir.path().join("absent.trf")).unwrap_err();
    assert!(matches!(err, StabilizeError::Io(_)));
}

#[test]
fn test_default_result_path() {
    assert_eq!(
        default_result_path(Path::new("/videos/clip.yuv")),
        Path::new("/videos/clip.yuv.trf")
    );
    assert_eq!(
        default_result_path(Path::new("frames")),
        Path::new("frames.trf")
    );
}
