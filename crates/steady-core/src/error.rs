use thiserror::Error;

#[derive(Error, Debug)]
pub enum StabilizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("Frame buffer has {actual} bytes, expected {expected}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Allocation failed: {0}")]
    Allocation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Window {width}x{height} at ({x}, {y}) exceeds the frame")]
    WindowOutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },

    #[error("Malformed transform record on line {line}: {reason}")]
    TransformParse { line: usize, reason: String },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, StabilizeError>;
